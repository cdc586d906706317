// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use permission_requester::{PermissionAuthority, RequestCode, runtime_permissions};

mod manifest {
    pub const READ_CONTACTS: &str = "android.permission.READ_CONTACTS";
    pub const WRITE_CONTACTS: &str = "android.permission.WRITE_CONTACTS";
}

pub struct Contacts;

impl PermissionAuthority for Contacts {
    fn check_granted(&self, _permission: &str) -> bool {
        true
    }

    fn request_permissions(&self, _permissions: &[&'static str], _code: RequestCode) {}
}

#[runtime_permissions]
impl Contacts {
    #[requires_permission(manifest::READ_CONTACTS, manifest::WRITE_CONTACTS, suffix = "_with_access")]
    #[before_request(explain)]
    #[on_denied("give_up")]
    pub fn merge(&self, first: i64, second: i64, keep: Option<String>) {
        let _ = (first, second, keep);
    }

    fn explain(&self) {}

    fn give_up(&self) {}
}

fn main() {
    let contacts = Arc::new(Contacts);
    ContactsPermissionRequester::merge_with_access(1, 2, None, &contacts);
    assert_eq!(ContactsPermissionRequester::pending_requests(), 1);
}
