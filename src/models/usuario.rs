use serde::{Deserialize, Serialize};

/// Usuario tal como lo lista el servicio de usuarios (sin contraseña)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Usuario {
    pub id_usuario: i64,
    pub nombre: String,
    pub apellido: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// El listado de usuarios llega como array o envuelto en `usuarios`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RespuestaUsuarios {
    Lista(Vec<Usuario>),
    Envuelta {
        #[serde(default)]
        usuarios: Vec<Usuario>,
    },
}

impl RespuestaUsuarios {
    pub fn into_vec(self) -> Vec<Usuario> {
        match self {
            RespuestaUsuarios::Lista(u) => u,
            RespuestaUsuarios::Envuelta { usuarios } => usuarios,
        }
    }
}

/// Borrador de los formularios de registro, alta y edición de usuario
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct BorradorUsuario {
    pub nombre: String,
    pub apellido: String,
    pub email: String,
    pub username: String,
    pub password: String,
    pub confirm_password: Option<String>,
    pub is_admin: bool,
}

impl BorradorUsuario {
    /// Precarga el formulario de edición; la contraseña queda vacía
    pub fn desde_usuario(usuario: &Usuario) -> Self {
        Self {
            nombre: usuario.nombre.clone(),
            apellido: usuario.apellido.clone(),
            email: usuario.email.clone(),
            username: usuario.username.clone(),
            password: String::new(),
            confirm_password: None,
            is_admin: usuario.is_admin,
        }
    }
}

/// Cuerpo de POST /register y POST /users
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NuevoUsuario {
    pub nombre: String,
    pub apellido: String,
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// Cuerpo de PUT /users/{id}
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UsuarioActualizado {
    pub nombre: String,
    pub apellido: String,
    pub email: String,
    pub is_admin: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Credenciales {
    pub username: String,
    pub password: String,
}

/// Respuesta de /login y /register
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RespuestaToken {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: i64,
}
