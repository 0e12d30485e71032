//! Users and the store they live in.
//!
//! Handlers see the store only through [`UserStore`]. [`MemoryStore`] is the
//! in-process implementation the server runs with; any locking is its own
//! business.

use std::collections::HashMap;

use parking_lot::RwLock;

/// A registered user. The password is compared in plain text.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct User {
    pub user_id: String,
    pub password: String,
    pub name: String,
    pub email: String,
}

impl User {
    pub fn new(
        user_id: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            password: password.into(),
            name: name.into(),
            email: email.into(),
        }
    }

    /// Exact, case-sensitive comparison.
    pub fn matches_password(&self, password: &str) -> bool {
        self.password == password
    }
}

/// Storage contract the request handlers depend on.
///
/// Implementations are shared by every connection worker. A lookup that
/// starts after `add_user` returns must observe the new user.
pub trait UserStore: Send + Sync {
    /// Inserts `user`, replacing any user with the same id.
    fn add_user(&self, user: User);

    fn find_user_by_id(&self, user_id: &str) -> Option<User>;

    /// A snapshot of all users in insertion order.
    fn find_all(&self) -> Vec<User>;
}

/// In-memory [`UserStore`] guarded by a read-write lock.
///
/// Re-adding an existing id overwrites that user where it stands, so
/// [`find_all`](UserStore::find_all) order is first-registration order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Users>,
}

#[derive(Debug, Default)]
struct Users {
    ordered: Vec<User>,
    by_id: HashMap<String, usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserStore for MemoryStore {
    fn add_user(&self, user: User) {
        let mut users = self.inner.write();
        let existing = users.by_id.get(&user.user_id).copied();
        match existing {
            Some(i) => users.ordered[i] = user,
            None => {
                let i = users.ordered.len();
                users.by_id.insert(user.user_id.clone(), i);
                users.ordered.push(user);
            }
        }
    }

    fn find_user_by_id(&self, user_id: &str) -> Option<User> {
        let users = self.inner.read();
        users.by_id.get(user_id).map(|&i| users.ordered[i].clone())
    }

    fn find_all(&self) -> Vec<User> {
        self.inner.read().ordered.clone()
    }
}
