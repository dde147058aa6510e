use super::{Identity, IdentityProvider};
use crate::config::FirebaseConfig;
use crate::error::AuthError;
use crate::types::UserProfile;
use async_trait::async_trait;
use dioxus::prelude::*;
use serde::Deserialize;

const FIREBASE_SDK: &str = "https://www.gstatic.com/firebasejs/10.12.2";

const SIGN_IN_SCRIPT: &str = r#"
const config = __CONFIG__;
try {
    const appSdk = await import("__SDK__/firebase-app.js");
    const authSdk = await import("__SDK__/firebase-auth.js");
    const app = appSdk.getApps().length ? appSdk.getApp() : appSdk.initializeApp(config);
    const auth = authSdk.getAuth(app);
    const result = await authSdk.signInWithPopup(auth, new authSdk.GoogleAuthProvider());
    const user = result.user;
    const token = await user.getIdToken();
    dioxus.send({
        status: "ok",
        name: user.displayName || "",
        email: user.email || "",
        avatar_url: user.photoURL || null,
        token: token,
    });
} catch (err) {
    const code = (err && err.code) || "";
    const cancelled = code === "auth/popup-closed-by-user" || code === "auth/cancelled-popup-request";
    dioxus.send({
        status: cancelled ? "cancelled" : "error",
        message: String((err && err.message) || err),
    });
}
"#;

const SIGN_OUT_SCRIPT: &str = r#"
try {
    const appSdk = await import("__SDK__/firebase-app.js");
    const authSdk = await import("__SDK__/firebase-auth.js");
    if (appSdk.getApps().length) {
        await authSdk.signOut(authSdk.getAuth(appSdk.getApp()));
    }
    dioxus.send({ status: "ok" });
} catch (err) {
    dioxus.send({ status: "error", message: String((err && err.message) || err) });
}
"#;

#[derive(Deserialize, Debug, PartialEq)]
#[serde(tag = "status", rename_all = "lowercase")]
enum PopupOutcome {
    Ok {
        name: String,
        email: String,
        #[serde(default)]
        avatar_url: Option<String>,
        token: String,
    },
    Cancelled {
        #[serde(default)]
        message: String,
    },
    Error {
        #[serde(default)]
        message: String,
    },
}

#[derive(Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum SignOutOutcome {
    Ok,
    Error {
        #[serde(default)]
        message: String,
    },
}

impl PopupOutcome {
    fn into_identity(self) -> Result<Identity, AuthError> {
        match self {
            PopupOutcome::Ok {
                name,
                email,
                avatar_url,
                token,
            } => {
                if token.is_empty() {
                    return Err(AuthError::Payload("provider returned an empty token".into()));
                }
                Ok(Identity {
                    user: UserProfile {
                        name,
                        email,
                        avatar_url,
                    },
                    token,
                })
            }
            PopupOutcome::Cancelled { message } => {
                tracing::debug!(%message, "sign-in popup closed");
                Err(AuthError::Cancelled)
            }
            PopupOutcome::Error { message } => Err(AuthError::Provider(message)),
        }
    }
}

/// Google sign-in via the Firebase web SDK, driven through the Dioxus
/// document bridge so it works the same in the browser and in the webview.
pub struct FirebaseIdentity {
    config: FirebaseConfig,
}

impl FirebaseIdentity {
    pub fn new(config: FirebaseConfig) -> Self {
        Self { config }
    }

    fn sign_in_script(&self) -> Result<String, AuthError> {
        let config =
            serde_json::to_string(&self.config).map_err(|e| AuthError::Payload(e.to_string()))?;
        Ok(SIGN_IN_SCRIPT
            .replace("__SDK__", FIREBASE_SDK)
            .replace("__CONFIG__", &config))
    }
}

#[async_trait(?Send)]
impl IdentityProvider for FirebaseIdentity {
    async fn sign_in(&self) -> Result<Identity, AuthError> {
        let mut eval = document::eval(&self.sign_in_script()?);
        let outcome: PopupOutcome = eval
            .recv()
            .await
            .map_err(|e| AuthError::Payload(e.to_string()))?;
        outcome.into_identity()
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let mut eval = document::eval(&SIGN_OUT_SCRIPT.replace("__SDK__", FIREBASE_SDK));
        let outcome: SignOutOutcome = eval
            .recv()
            .await
            .map_err(|e| AuthError::Payload(e.to_string()))?;
        match outcome {
            SignOutOutcome::Ok => Ok(()),
            SignOutOutcome::Error { message } => Err(AuthError::Provider(message)),
        }
    }
}
