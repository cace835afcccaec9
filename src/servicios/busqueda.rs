use reqwest::Client;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

use super::{leer_json, Endpoint};
use crate::constantes::ERROR_BUSQUEDA;
use crate::error::ApiError;
use crate::models::{FiltrosBusqueda, RespuestaBusqueda, RespuestaBusquedaCruda};

/// Motor de búsqueda paginada en el servidor
#[derive(Debug, Clone)]
pub struct ServicioBusqueda {
    endpoint: Endpoint,
}

impl ServicioBusqueda {
    pub fn new(base: &str, client: Client) -> Self {
        Self {
            endpoint: Endpoint::new(base, client),
        }
    }

    pub async fn buscar(&self, filtros: &FiltrosBusqueda) -> Result<RespuestaBusqueda, ApiError> {
        let ruta = "/activities";
        let params = parametros(filtros);
        debug!("Buscando actividades con {:?}", params);

        let resp = self.endpoint.get(ruta).query(&params).send().await?;
        let cruda: RespuestaBusquedaCruda = leer_json(resp, ruta, ERROR_BUSQUEDA).await?;
        Ok(cruda.into())
    }
}

/// Solo viajan los filtros con valor; el día se llama `diaSemana` en el servidor
fn parametros(filtros: &FiltrosBusqueda) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    let textos = [
        ("titulo", &filtros.titulo),
        ("descripcion", &filtros.descripcion),
        ("diaSemana", &filtros.dia),
    ];
    for (clave, valor) in textos {
        if !valor.trim().is_empty() {
            params.push((clave, valor.trim().to_string()));
        }
    }
    if let Some(page) = filtros.page.filter(|p| *p > 0) {
        params.push(("page", page.to_string()));
    }
    if let Some(count) = filtros.count.filter(|c| *c > 0) {
        params.push(("count", count.to_string()));
    }
    params
}

/// Resultado de una búsqueda vigilada por número de secuencia
#[derive(Debug, Clone, PartialEq)]
pub enum ResultadoBusqueda {
    Aplicada(RespuestaBusqueda),
    /// Llegó después de que se emitiera una búsqueda más nueva
    Descartada,
}

/// Envuelve al servicio para que una respuesta lenta no pise a una más nueva
#[derive(Debug)]
pub struct BuscadorActividades {
    servicio: ServicioBusqueda,
    secuencia: AtomicU64,
}

impl BuscadorActividades {
    pub fn new(servicio: ServicioBusqueda) -> Self {
        Self {
            servicio,
            secuencia: AtomicU64::new(0),
        }
    }

    /// Número de la última búsqueda emitida
    pub fn ultima(&self) -> u64 {
        self.secuencia.load(Ordering::SeqCst)
    }

    /// Los errores de una búsqueda ya superada también se descartan
    pub async fn buscar(&self, filtros: &FiltrosBusqueda) -> Result<ResultadoBusqueda, ApiError> {
        let mia = self.secuencia.fetch_add(1, Ordering::SeqCst) + 1;
        let resultado = self.servicio.buscar(filtros).await;

        if self.ultima() != mia {
            debug!("Búsqueda {} descartada; la última es {}", mia, self.ultima());
            return Ok(ResultadoBusqueda::Descartada);
        }
        resultado.map(ResultadoBusqueda::Aplicada)
    }
}
