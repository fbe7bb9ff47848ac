use crate::domain::UserId;

// ============== Authorization ==============

/// Users allowed to add/remove other people. Loaded once at startup and
/// never mutated afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdminAllowlist {
    admins: Vec<UserId>,
}

impl AdminAllowlist {
    pub fn new(admins: impl IntoIterator<Item = UserId>) -> Self {
        let mut out: Vec<UserId> = Vec::new();
        for id in admins {
            if !out.contains(&id) {
                out.push(id);
            }
        }
        Self { admins: out }
    }

    pub fn is_authorized(&self, requester: &UserId) -> bool {
        is_authorized(Some(requester), &self.admins)
    }

    pub fn len(&self) -> usize {
        self.admins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.admins.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &UserId> {
        self.admins.iter()
    }
}

pub fn is_authorized(user_id: Option<&UserId>, allowed_users: &[UserId]) -> bool {
    let Some(user_id) = user_id else {
        return false;
    };
    if allowed_users.is_empty() {
        return false;
    }
    allowed_users.contains(user_id)
}
