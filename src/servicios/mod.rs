//! Clientes HTTP de los tres servicios remotos.
//!
//! Cada servicio es un mapeo delgado entre una operación del cliente y un
//! endpoint JSON. Las respuestas no exitosas se convierten en
//! [`ApiError::Http`] con el mensaje del cuerpo o uno por defecto.

pub mod actividades;
pub mod busqueda;
pub mod usuarios;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::error;

use crate::error::ApiError;
use crate::utils::{mensaje_de_error, unir_url};

pub use actividades::ServicioActividades;
pub use busqueda::{BuscadorActividades, ResultadoBusqueda, ServicioBusqueda};
pub use usuarios::ServicioUsuarios;

/// Construye el cliente compartido. Sin timeout se usa el del transporte.
pub fn construir_cliente(timeout: Option<Duration>) -> Result<Client, ApiError> {
    let mut builder = Client::builder();
    if let Some(t) = timeout {
        builder = builder.timeout(t);
    }
    Ok(builder.build()?)
}

/// URL base más cliente; lo comparten los tres servicios
#[derive(Debug, Clone)]
pub struct Endpoint {
    base: String,
    client: Client,
}

impl Endpoint {
    pub fn new(base: &str, client: Client) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn url(&self, ruta: &str) -> String {
        unir_url(&self.base, ruta)
    }

    pub fn get(&self, ruta: &str) -> RequestBuilder {
        self.client.get(self.url(ruta))
    }

    pub fn post(&self, ruta: &str) -> RequestBuilder {
        self.client.post(self.url(ruta))
    }

    pub fn put(&self, ruta: &str) -> RequestBuilder {
        self.client.put(self.url(ruta))
    }

    pub fn delete(&self, ruta: &str) -> RequestBuilder {
        self.client.delete(self.url(ruta))
    }
}

/// Agrega `Authorization: Bearer <token>`
pub(crate) fn con_token(req: RequestBuilder, token: &str) -> RequestBuilder {
    req.header("Authorization", format!("Bearer {}", token))
}

/// Falla con el mensaje del servidor si el status no es 2xx
pub(crate) async fn verificar(
    resp: Response,
    ruta: &str,
    por_defecto: &str,
) -> Result<Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let cuerpo = resp.text().await.unwrap_or_default();
    let mensaje = mensaje_de_error(&cuerpo, por_defecto);
    error!("API {} respondió HTTP {}: {}", ruta, status.as_u16(), mensaje);
    Err(ApiError::Http {
        status: status.as_u16(),
        mensaje,
    })
}

/// Verifica el status y decodifica el cuerpo JSON
pub(crate) async fn leer_json<T: DeserializeOwned>(
    resp: Response,
    ruta: &str,
    por_defecto: &str,
) -> Result<T, ApiError> {
    let resp = verificar(resp, ruta, por_defecto).await?;
    let texto = resp.text().await?;
    serde_json::from_str(&texto).map_err(|e| {
        error!("Respuesta de {} no se pudo interpretar: {}", ruta, e);
        ApiError::RespuestaInvalida(e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url() {
        let client = construir_cliente(Some(Duration::from_secs(1))).unwrap();
        let ep = Endpoint::new("http://localhost:8084/", client);
        assert_eq!(ep.base(), "http://localhost:8084");
        assert_eq!(ep.url("/activities/3"), "http://localhost:8084/activities/3");
    }

    #[test]
    fn test_cliente_sin_timeout() {
        assert!(construir_cliente(None).is_ok());
    }
}
