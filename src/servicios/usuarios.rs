use reqwest::{Client, StatusCode};
use tracing::{debug, info};

use super::{con_token, leer_json, verificar, Endpoint};
use crate::constantes::*;
use crate::error::ApiError;
use crate::models::{
    Credenciales, NuevoUsuario, RespuestaToken, RespuestaUsuarios, Usuario, UsuarioActualizado,
};
use crate::utils::mensaje_de_error;

/// Servicio de usuarios: autenticación y administración
#[derive(Debug, Clone)]
pub struct ServicioUsuarios {
    endpoint: Endpoint,
}

impl ServicioUsuarios {
    pub fn new(base: &str, client: Client) -> Self {
        Self {
            endpoint: Endpoint::new(base, client),
        }
    }

    pub async fn login(&self, credenciales: &Credenciales) -> Result<RespuestaToken, ApiError> {
        let ruta = "/login";
        debug!("Iniciando sesión de {}", credenciales.username);
        let resp = self.endpoint.post(ruta).json(credenciales).send().await?;
        leer_json(resp, ruta, ERROR_LOGIN).await
    }

    /// El servidor inicia sesión al registrar y devuelve el token
    pub async fn registrar(&self, datos: &NuevoUsuario) -> Result<RespuestaToken, ApiError> {
        let ruta = "/register";
        let resp = self.endpoint.post(ruta).json(datos).send().await?;
        let token: RespuestaToken = leer_json(resp, ruta, ERROR_REGISTRO).await?;
        info!("Usuario registrado: {}", datos.username);
        Ok(token)
    }

    pub async fn listar(&self, token: &str) -> Result<Vec<Usuario>, ApiError> {
        let ruta = "/users";
        let resp = con_token(self.endpoint.get(ruta), token).send().await?;
        let r: RespuestaUsuarios = leer_json(resp, ruta, ERROR_FETCH_USUARIOS).await?;
        let usuarios = r.into_vec();
        info!("Usuarios cargados: {}", usuarios.len());
        Ok(usuarios)
    }

    pub async fn obtener(&self, token: &str, id: i64) -> Result<Usuario, ApiError> {
        let ruta = format!("/users/{}", id);
        let resp = con_token(self.endpoint.get(&ruta), token).send().await?;
        leer_json(resp, &ruta, ERROR_FETCH_USUARIO).await
    }

    /// Alta desde el panel de administración
    pub async fn crear(&self, token: &str, datos: &NuevoUsuario) -> Result<(), ApiError> {
        let ruta = "/users";
        let resp = con_token(self.endpoint.post(ruta), token)
            .json(datos)
            .send()
            .await?;
        verificar(resp, ruta, ERROR_CREATE_USUARIO).await?;
        info!("Usuario creado: {}", datos.username);
        Ok(())
    }

    pub async fn actualizar(
        &self,
        token: &str,
        id: i64,
        datos: &UsuarioActualizado,
    ) -> Result<(), ApiError> {
        let ruta = format!("/users/{}", id);
        let resp = con_token(self.endpoint.put(&ruta), token)
            .json(datos)
            .send()
            .await?;
        verificar(resp, &ruta, ERROR_UPDATE_USUARIO).await?;
        info!("Usuario {} actualizado", id);
        Ok(())
    }

    pub async fn eliminar(&self, token: &str, id: i64) -> Result<(), ApiError> {
        let ruta = format!("/users/{}", id);
        let resp = con_token(self.endpoint.delete(&ruta), token).send().await?;
        verificar(resp, &ruta, ERROR_DELETE_USUARIO).await?;
        info!("Usuario {} eliminado", id);
        Ok(())
    }

    /// 200 = administrador, 403 = no lo es; cualquier otro status es error
    pub async fn es_admin(&self, token: &str) -> Result<bool, ApiError> {
        let ruta = "/auth";
        let resp = con_token(self.endpoint.get(ruta), token).send().await?;
        match resp.status() {
            StatusCode::OK => Ok(true),
            StatusCode::FORBIDDEN => Ok(false),
            status => {
                let cuerpo = resp.text().await.unwrap_or_default();
                Err(ApiError::Http {
                    status: status.as_u16(),
                    mensaje: mensaje_de_error(&cuerpo, ERROR_AUTH),
                })
            }
        }
    }
}
