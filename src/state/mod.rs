//! Application State Management
//!
//! Session state shared through Leptos context.

use leptos::*;

use crate::client::{self, Admin};

/// Global application state, provided as context from `App`.
#[derive(Clone)]
pub struct AppState {
    /// Logged-in administrator, `None` when the session is closed
    pub usuario: RwSignal<Option<Admin>>,
    /// True while the stored token is being validated on startup
    pub cargando: RwSignal<bool>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            usuario: create_rw_signal(None),
            cargando: create_rw_signal(true),
        }
    }

    pub fn sesion_activa(&self) -> bool {
        self.usuario.get().is_some()
    }

    /// Validates a stored token against `/auth/me`; called once on mount.
    pub async fn validar_sesion(&self) {
        if client::token_guardado().is_none() {
            self.cargando.set(false);
            return;
        }
        match client::me().await {
            Ok(me) => {
                tracing::info!(email = %me.email, "sesión restaurada");
                self.usuario.set(Some(Admin {
                    nombre: me.nombre,
                    email: me.email,
                }));
            }
            Err(e) => {
                tracing::warn!(error = %e, "token guardado inválido");
                client::borrar_token();
                self.usuario.set(None);
            }
        }
        self.cargando.set(false);
    }

    pub async fn iniciar_sesion(&self, email: &str, password: &str) -> Result<(), client::ApiError> {
        let respuesta = client::login(email, password).await?;
        client::guardar_token(&respuesta.access_token);
        self.usuario.set(Some(respuesta.admin));
        Ok(())
    }

    pub fn cerrar_sesion(&self) {
        tracing::info!("sesión cerrada");
        client::borrar_token();
        self.usuario.set(None);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
