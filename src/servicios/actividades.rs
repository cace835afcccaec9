use reqwest::Client;
use tracing::{debug, info};

use super::{con_token, leer_json, verificar, Endpoint};
use crate::constantes::*;
use crate::error::ApiError;
use crate::models::{
    Actividad, ActividadPayload, Estadisticas, Inscripciones, ListaActividades,
    RespuestaActividad, RespuestaInscripciones,
};

/// Servicio de actividades e inscripciones
#[derive(Debug, Clone)]
pub struct ServicioActividades {
    endpoint: Endpoint,
}

impl ServicioActividades {
    pub fn new(base: &str, client: Client) -> Self {
        Self {
            endpoint: Endpoint::new(base, client),
        }
    }

    pub async fn listar(&self) -> Result<Vec<Actividad>, ApiError> {
        let ruta = "/activities";
        debug!("Cargando actividades desde {}", self.endpoint.base());
        let resp = self.endpoint.get(ruta).send().await?;
        let lista: ListaActividades = leer_json(resp, ruta, ERROR_FETCH_ACTIVIDADES).await?;
        let actividades = lista.into_vec();
        info!("Actividades cargadas: {}", actividades.len());
        Ok(actividades)
    }

    pub async fn obtener(&self, id: &str) -> Result<Actividad, ApiError> {
        let ruta = format!("/activities/{}", id);
        debug!("Cargando actividad {}", id);
        let resp = self.endpoint.get(&ruta).send().await?;
        let r: RespuestaActividad = leer_json(resp, &ruta, ERROR_FETCH_ACTIVIDAD).await?;
        Ok(r.into_actividad())
    }

    pub async fn crear(
        &self,
        token: &str,
        datos: &ActividadPayload,
    ) -> Result<Actividad, ApiError> {
        let ruta = "/activities";
        let resp = con_token(self.endpoint.post(ruta), token)
            .json(datos)
            .send()
            .await?;
        let r: RespuestaActividad = leer_json(resp, ruta, ERROR_CREATE_ACTIVIDAD).await?;
        let creada = r.into_actividad();
        info!("Actividad creada: {} ({})", creada.titulo, creada.id_actividad);
        Ok(creada)
    }

    pub async fn actualizar(
        &self,
        token: &str,
        id: &str,
        datos: &ActividadPayload,
    ) -> Result<Actividad, ApiError> {
        let ruta = format!("/activities/{}", id);
        let resp = con_token(self.endpoint.put(&ruta), token)
            .json(datos)
            .send()
            .await?;
        let r: RespuestaActividad = leer_json(resp, &ruta, ERROR_UPDATE_ACTIVIDAD).await?;
        info!("Actividad {} actualizada", id);
        Ok(r.into_actividad())
    }

    pub async fn eliminar(&self, token: &str, id: &str) -> Result<(), ApiError> {
        let ruta = format!("/activities/{}", id);
        let resp = con_token(self.endpoint.delete(&ruta), token).send().await?;
        verificar(resp, &ruta, ERROR_DELETE_ACTIVIDAD).await?;
        info!("Actividad {} eliminada", id);
        Ok(())
    }

    /// El usuario sale del token en el servidor; `usuario_id` solo se registra
    pub async fn inscribir(&self, token: &str, usuario_id: i64, id: &str) -> Result<(), ApiError> {
        let ruta = format!("/activities/{}/inscribir", id);
        let resp = con_token(self.endpoint.post(&ruta), token).send().await?;
        verificar(resp, &ruta, ERROR_ENROLL_ACTIVIDAD).await?;
        info!("Usuario {} inscripto en la actividad {}", usuario_id, id);
        Ok(())
    }

    pub async fn desinscribir(
        &self,
        token: &str,
        usuario_id: i64,
        id: &str,
    ) -> Result<(), ApiError> {
        let ruta = format!("/activities/{}/desinscribir", id);
        let resp = con_token(self.endpoint.post(&ruta), token).send().await?;
        verificar(resp, &ruta, ERROR_UNENROLL_ACTIVIDAD).await?;
        info!("Usuario {} desinscripto de la actividad {}", usuario_id, id);
        Ok(())
    }

    /// Ids de las actividades en las que está inscripto el usuario
    pub async fn inscripciones(
        &self,
        token: &str,
        usuario_id: i64,
    ) -> Result<Inscripciones, ApiError> {
        let ruta = format!("/inscriptions/{}", usuario_id);
        let resp = con_token(self.endpoint.get(&ruta), token).send().await?;
        let r: RespuestaInscripciones = leer_json(resp, &ruta, ERROR_FETCH_INSCRIPCIONES).await?;
        let set = r.into_set();
        debug!("Inscripciones de {}: {}", usuario_id, set.len());
        Ok(set)
    }

    /// Datos completos de las actividades del usuario ("Mis actividades")
    pub async fn actividades_inscriptas(
        &self,
        token: &str,
        usuario_id: i64,
    ) -> Result<Vec<Actividad>, ApiError> {
        let ruta = format!("/inscriptions/data/{}", usuario_id);
        let resp = con_token(self.endpoint.get(&ruta), token).send().await?;
        let lista: ListaActividades = leer_json(resp, &ruta, ERROR_FETCH_INSCRIPCIONES).await?;
        Ok(lista.into_vec())
    }

    pub async fn estadisticas(&self, token: &str) -> Result<Estadisticas, ApiError> {
        let ruta = "/activities/statistics";
        let resp = con_token(self.endpoint.get(ruta), token).send().await?;
        leer_json(resp, ruta, ERROR_ESTADISTICAS).await
    }
}
