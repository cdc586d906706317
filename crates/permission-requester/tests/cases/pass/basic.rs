// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use permission_requester::{GrantResult, PermissionAuthority, RequestCode, runtime_permissions};

pub struct Camera;

impl PermissionAuthority for Camera {
    fn check_granted(&self, _permission: &str) -> bool {
        false
    }

    fn request_permissions(&self, _permissions: &[&'static str], _code: RequestCode) {}
}

#[runtime_permissions]
impl Camera {
    #[requires_permission("android.permission.CAMERA")]
    pub fn snap(&self, label: String, quality: u8, flash: bool) {
        let _ = (label, quality, flash);
    }

    #[requires_permission("android.permission.CAMERA", "android.permission.RECORD_AUDIO")]
    pub fn film(&self, seconds: f64) -> Vec<u8> {
        vec![0; seconds as usize]
    }
}

fn main() {
    let camera = Arc::new(Camera);
    CameraPermissionRequester::snap_checked("front".to_string(), 90, true, &camera);
    CameraPermissionRequester::film_checked(1.5, &camera);

    let code: RequestCode = CameraPermissionRequester::SNAP_REQUEST_CODE;
    let _ = CameraPermissionRequester::on_request_permissions_result(
        code,
        &["android.permission.CAMERA"],
        &[GrantResult::Granted]
    );
    assert!(!CameraPermissionRequester::is_pending(code));
    assert!(CameraPermissionRequester::is_pending(
        CameraPermissionRequester::FILM_REQUEST_CODE
    ));
    let _companion = CameraPermissionRequester;
}
