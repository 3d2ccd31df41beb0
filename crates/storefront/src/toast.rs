//! One-shot notifications.
//!
//! A handler queues a toast in the session and redirects; the next rendered
//! page takes it out and shows it. Queuing replaces any toast still pending.
//!
//! A visitor with nothing else stored gets a session only for the toast, so
//! taking the last value deletes the session record.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

/// Session key for the pending toast.
pub const TOAST_KEY: &str = "hc-toast";

pub const ITEM_ADDED: &str = "✅ Item adicionado ao pedido.";
pub const ITEM_REMOVED: &str = "Item removido.";
pub const ADD_FAILED: &str = "Erro ao adicionar item.";
pub const SAVE_FAILED: &str = "Não foi possível atualizar o pedido.";
pub const CART_EMPTY: &str = "Seu pedido está vazio.";
pub const ORDER_PLACED: &str = "✅ Pedido realizado! Checaremos o pagamento na chegada.";
pub const CONTACT_INCOMPLETE: &str = "Preencha todos os campos.";
pub const CONTACT_BAD_EMAIL: &str = "Informe um e-mail válido.";
pub const CONTACT_SENT: &str = "🍔 Mensagem enviada! Responderemos em breve.";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PendingToast {
    message: String,
}

/// Toast display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastView {
    pub message: String,
    pub timeout_ms: u32,
}

/// Queue `message` for the next page.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn push(session: &Session, message: &str) -> Result<(), tower_sessions::session::Error> {
    session
        .insert(
            TOAST_KEY,
            PendingToast {
                message: message.to_string(),
            },
        )
        .await
}

/// Take the pending toast, if any. A toast is shown once.
pub async fn take(session: &Session, timeout_ms: u32) -> Option<ToastView> {
    match session.remove::<PendingToast>(TOAST_KEY).await {
        Ok(pending) => {
            if pending.is_some() {
                reclaim_if_empty(session).await;
            }
            pending.map(|toast| ToastView {
                message: toast.message,
                timeout_ms,
            })
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read pending toast");
            None
        }
    }
}

/// Delete the session record once nothing is left in it.
async fn reclaim_if_empty(session: &Session) {
    if !session.is_empty().await {
        return;
    }
    if let Err(e) = session.flush().await {
        tracing::warn!(error = %e, "Failed to delete empty session");
    }
}
