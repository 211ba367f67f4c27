//! Plain-text rendering of users, pages and form errors.

use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use crate::model::{User, UserStatus};
use crate::pagination::{PageLink, PageWindow};
use crate::validation::ValidationErrors;

/// Shown in place of rows when the collection is empty.
pub const NO_DATA: &str = "No data available";

pub fn users_table(users: &[User]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").fg(Color::White),
            Cell::new("Name").fg(Color::White),
            Cell::new("Email").fg(Color::White),
            Cell::new("Status").fg(Color::White),
        ]);

    if users.is_empty() {
        table.add_row(vec![Cell::new(NO_DATA).fg(Color::DarkGrey)]);
        return table;
    }

    for user in users {
        let status_color = match user.status {
            UserStatus::Active => Color::Green,
            UserStatus::Inactive => Color::DarkGrey,
            UserStatus::Pending => Color::Yellow,
        };
        table.add_row(vec![
            Cell::new(&user.id).fg(Color::Yellow),
            Cell::new(&user.name),
            Cell::new(&user.email),
            Cell::new(user.status).fg(status_color),
        ]);
    }
    table
}

/// Page navigation line, e.g. `< 1 ... 4 [5] 6 ... 10 >`.
///
/// The current page is bracketed; `<` and `>` appear only when there is a
/// previous or next page.
pub fn pager(window: &PageWindow<'_, User>) -> Option<String> {
    let links = window.links();
    if links.is_empty() {
        return None;
    }
    let mut parts = Vec::with_capacity(links.len() + 2);
    if window.has_previous() {
        parts.push("<".to_string());
    }
    parts.extend(links.iter().map(|link| match link {
        PageLink::Page(page) if *page == window.current_page => format!("[{page}]"),
        other => other.to_string(),
    }));
    if window.has_next() {
        parts.push(">".to_string());
    }
    Some(parts.join(" "))
}

/// The table followed by the entry summary and the page navigation.
pub fn page(window: &PageWindow<'_, User>) -> String {
    let mut out = users_table(window.items).to_string();
    if let Some(summary) = window.summary() {
        out.push('\n');
        out.push_str(&summary);
    }
    if let Some(pager) = pager(window) {
        out.push('\n');
        out.push_str(&pager);
    }
    out
}

pub fn user_details(user: &User) -> String {
    format!(
        "ID:     {}\nName:   {}\nEmail:  {}\nStatus: {}",
        user.id, user.name, user.email, user.status
    )
}

/// One indented `field: message` line per error.
pub fn field_errors(errors: &ValidationErrors) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("  {field}: {message}"))
        .collect::<Vec<_>>()
        .join("\n")
}
