// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use permission_requester as perms;

mod storage {
    use super::perms::{PermissionAuthority, RequestCode};

    pub struct Storage;

    impl PermissionAuthority for Storage {
        fn check_granted(&self, _permission: &str) -> bool {
            true
        }

        fn request_permissions(&self, _permissions: &[&'static str], _code: RequestCode) {}
    }

    #[super::perms::runtime_permissions(
        crate = "super::perms",
        vis = "pub(crate)",
        grant_policy = "skip_if_granted"
    )]
    impl Storage {
        #[requires_permission("WRITE_STORAGE")]
        pub(crate) fn save(&self, name: String, bytes: Vec<u8>) -> std::io::Result<()> {
            let _ = (name, bytes);
            Ok(())
        }
    }
}

fn main() {
    let storage = Arc::new(storage::Storage);
    storage::StoragePermissionRequester::save_checked("a.txt".to_string(), vec![1], &storage);
    assert_eq!(storage::StoragePermissionRequester::pending_requests(), 0);
}
