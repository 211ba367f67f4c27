//! # Mock Collection
//!
//! Utilities for testing the list controller without a server.
//!
//! [`MockUserCollection`] answers calls from a queue of expectations set up with
//! a fluent builder, and records every call it receives. Calls that do not match
//! the next expectation fail with a transport error instead of panicking, so the
//! controller keeps running; [`MockUserCollection::verify`] reports them.
//!
//! # Example
//! ```ignore
//! let mock = MockUserCollection::new();
//! mock.expect_list().return_ok(vec![user.clone()]);
//! mock.expect_delete(user.id.clone()).return_ok(());
//! mock.expect_list().return_ok(vec![]);
//!
//! // hand `mock.clone()` to the controller, drive it...
//! mock.verify();
//! ```

use crate::clients::{ClientError, UserCollection};
use crate::model::{User, UserDraft, UserId};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A call received by the mock, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List,
    Get(UserId),
    Create(UserDraft),
    Update(UserId, UserDraft),
    Delete(UserId),
}

/// Represents an expected call and the response to return for it.
enum Expectation {
    List(Result<Vec<User>, ClientError>),
    Get(UserId, Result<User, ClientError>),
    Create(Result<User, ClientError>),
    Update(UserId, Result<User, ClientError>),
    Delete(UserId, Result<(), ClientError>),
}

#[derive(Default)]
struct MockState {
    expectations: VecDeque<Expectation>,
    calls: Vec<Call>,
    mismatches: Vec<String>,
}

/// A mock [`UserCollection`] with expectation tracking for fluent testing.
///
/// Clones share the same expectations and call log.
#[derive(Clone, Default)]
pub struct MockUserCollection {
    state: Arc<Mutex<MockState>>,
}

impl MockUserCollection {
    /// Creates a new mock with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn push(&self, expectation: Expectation) {
        self.lock().expectations.push_back(expectation);
    }

    /// Expects a `list` call.
    pub fn expect_list(&self) -> ExpectationBuilder<'_, Vec<User>> {
        ExpectationBuilder::new(self, Box::new(Expectation::List))
    }

    /// Expects a `get` call for `id`.
    pub fn expect_get(&self, id: impl Into<UserId>) -> ExpectationBuilder<'_, User> {
        let id = id.into();
        ExpectationBuilder::new(self, Box::new(move |response| Expectation::Get(id, response)))
    }

    /// Expects a `create` call.
    pub fn expect_create(&self) -> ExpectationBuilder<'_, User> {
        ExpectationBuilder::new(self, Box::new(Expectation::Create))
    }

    /// Expects an `update` call for `id`.
    pub fn expect_update(&self, id: impl Into<UserId>) -> ExpectationBuilder<'_, User> {
        let id = id.into();
        ExpectationBuilder::new(self, Box::new(move |response| Expectation::Update(id, response)))
    }

    /// Expects a `delete` call for `id`.
    pub fn expect_delete(&self, id: impl Into<UserId>) -> ExpectationBuilder<'_, ()> {
        let id = id.into();
        ExpectationBuilder::new(self, Box::new(move |response| Expectation::Delete(id, response)))
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    /// Verifies that all expectations were met and no unexpected call arrived.
    ///
    /// # Panics
    ///
    /// Panics listing the unmatched calls or the number of pending expectations.
    pub fn verify(&self) {
        let state = self.lock();
        if !state.mismatches.is_empty() {
            panic!("Unexpected calls: {}", state.mismatches.join("; "));
        }
        if !state.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                state.expectations.len()
            );
        }
    }

    fn next(&self, call: Call) -> Result<Expectation, ClientError> {
        let mut state = self.lock();
        state.calls.push(call.clone());
        match state.expectations.pop_front() {
            Some(expectation) => Ok(expectation),
            None => {
                let reason = format!("{call:?} with no expectation left");
                state.mismatches.push(reason.clone());
                Err(ClientError::transport(reason))
            }
        }
    }

    fn mismatch(&self, call: &Call) -> ClientError {
        let reason = format!("{call:?} did not match the next expectation");
        self.lock().mismatches.push(reason.clone());
        ClientError::transport(reason)
    }
}

#[async_trait]
impl UserCollection for MockUserCollection {
    async fn list(&self) -> Result<Vec<User>, ClientError> {
        let call = Call::List;
        match self.next(call.clone())? {
            Expectation::List(response) => response,
            _ => Err(self.mismatch(&call)),
        }
    }

    async fn get(&self, id: &UserId) -> Result<User, ClientError> {
        let call = Call::Get(id.clone());
        match self.next(call.clone())? {
            Expectation::Get(expected, response) if &expected == id => response,
            _ => Err(self.mismatch(&call)),
        }
    }

    async fn create(&self, draft: &UserDraft) -> Result<User, ClientError> {
        let call = Call::Create(draft.clone());
        match self.next(call.clone())? {
            Expectation::Create(response) => response,
            _ => Err(self.mismatch(&call)),
        }
    }

    async fn update(&self, id: &UserId, draft: &UserDraft) -> Result<User, ClientError> {
        let call = Call::Update(id.clone(), draft.clone());
        match self.next(call.clone())? {
            Expectation::Update(expected, response) if &expected == id => response,
            _ => Err(self.mismatch(&call)),
        }
    }

    async fn delete(&self, id: &UserId) -> Result<(), ClientError> {
        let call = Call::Delete(id.clone());
        match self.next(call.clone())? {
            Expectation::Delete(expected, response) if &expected == id => response,
            _ => Err(self.mismatch(&call)),
        }
    }
}

type MakeExpectation<T> = Box<dyn FnOnce(Result<T, ClientError>) -> Expectation + Send>;

/// Builder that completes an expectation with its response.
pub struct ExpectationBuilder<'a, T> {
    mock: &'a MockUserCollection,
    make: MakeExpectation<T>,
}

impl<'a, T> ExpectationBuilder<'a, T> {
    fn new(mock: &'a MockUserCollection, make: MakeExpectation<T>) -> Self {
        Self { mock, make }
    }

    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: T) {
        self.mock.push((self.make)(Ok(value)));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: ClientError) {
        self.mock.push((self.make)(Err(error)));
    }
}
