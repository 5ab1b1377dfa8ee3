use gloo::storage::{LocalStorage, Storage};
use shared::{AuthResponse, UserProfile};
use yew::prelude::*;

const ACCESS_TOKEN_KEY: &str = "access_token";
const REFRESH_TOKEN_KEY: &str = "refresh_token";
const USER_KEY: &str = "user";

/// Persist the token pair and serialized identity after a successful login.
pub fn store_session(auth: &AuthResponse) {
    let _ = LocalStorage::set(ACCESS_TOKEN_KEY, &auth.access);
    let _ = LocalStorage::set(REFRESH_TOKEN_KEY, &auth.refresh);
    let _ = LocalStorage::set(USER_KEY, &auth.user);
}

/// Overwrite the cached identity after a profile re-sync.
pub fn store_user(user: &UserProfile) {
    let _ = LocalStorage::set(USER_KEY, user);
}

/// Bearer credential for the gateway, when a session exists.
pub fn access_token() -> Option<String> {
    LocalStorage::get(ACCESS_TOKEN_KEY).ok()
}

/// Synchronous read of the cached identity; `None` when absent or corrupt.
pub fn current_user() -> Option<UserProfile> {
    LocalStorage::get(USER_KEY).ok()
}

/// Remove tokens and identity together. Called on logout and on idle expiry;
/// must succeed locally even when the server logout notification failed.
pub fn clear_session() {
    LocalStorage::delete(ACCESS_TOKEN_KEY);
    LocalStorage::delete(REFRESH_TOKEN_KEY);
    LocalStorage::delete(USER_KEY);
}

/// Session handle injected at the app root via `ContextProvider`, so pages
/// and components never reach into browser storage themselves and the whole
/// surface can be mocked in tests.
///
/// `logout` posts the best-effort server notification, then unconditionally
/// clears local state and navigates to the sign-in page. `refresh` re-syncs
/// the identity from `/auth/profile/` and overwrites the cached copy.
#[derive(Clone, PartialEq)]
pub struct SessionContext {
    pub user: Option<UserProfile>,
    pub login: Callback<AuthResponse>,
    pub logout: Callback<()>,
    pub refresh: Callback<()>,
}

impl SessionContext {
    pub fn current(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn is_staff(&self) -> bool {
        self.user.as_ref().map(|u| u.is_staff).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::UserProfile;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn sample_auth() -> AuthResponse {
        AuthResponse {
            access: "access-abc".to_string(),
            refresh: "refresh-def".to_string(),
            user: UserProfile {
                student_id: "B11209000".to_string(),
                name: Some("Test Student".to_string()),
                email: Some("student@example.edu".to_string()),
                is_staff: false,
                is_superuser: false,
            },
        }
    }

    #[wasm_bindgen_test]
    fn store_then_read_back_identity_and_tokens() {
        clear_session();
        store_session(&sample_auth());

        assert_eq!(access_token().as_deref(), Some("access-abc"));
        let user = current_user().expect("identity should be cached");
        assert_eq!(user.student_id, "B11209000");
    }

    #[wasm_bindgen_test]
    fn clear_session_removes_everything_atomically() {
        store_session(&sample_auth());
        clear_session();

        assert!(access_token().is_none());
        assert!(current_user().is_none());
    }

    #[wasm_bindgen_test]
    fn refresh_overwrites_cached_identity() {
        store_session(&sample_auth());
        let updated = UserProfile {
            name: Some("Renamed Student".to_string()),
            ..sample_auth().user
        };
        store_user(&updated);

        let user = current_user().expect("identity should be cached");
        assert_eq!(user.name.as_deref(), Some("Renamed Student"));
        clear_session();
    }
}
