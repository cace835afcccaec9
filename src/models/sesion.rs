use serde::{Deserialize, Serialize};

pub const USERNAME_POR_DEFECTO: &str = "Usuario";

/// Payload del token de acceso. Solo se obtiene decodificando el token,
/// nunca se construye en el cliente.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Claims {
    #[serde(default)]
    pub id_usuario: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub is_admin: Option<bool>,
    #[serde(default)]
    pub exp: Option<i64>,
}

/// Vista de la sesión derivada del token en cada lectura
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SesionActual {
    pub usuario_id: Option<i64>,
    pub logueado: bool,
    pub es_admin: bool,
    pub username: String,
}

impl Default for SesionActual {
    fn default() -> Self {
        Self {
            usuario_id: None,
            logueado: false,
            es_admin: false,
            username: USERNAME_POR_DEFECTO.to_string(),
        }
    }
}

/// Resultado de revisar el token almacenado al iniciar
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum EstadoToken {
    SinToken,
    Vigente,
    Expirado,
}
