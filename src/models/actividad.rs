use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Actividad tal como la devuelve el servicio de actividades
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Actividad {
    pub id_actividad: String,
    pub titulo: String,
    pub descripcion: String,
    pub instructor: String,
    pub dia: String,
    pub hora_inicio: String,
    pub hora_fin: String,
    pub cupo: i64,
    #[serde(default)]
    pub lugares_disponibles: i64,
    #[serde(default)]
    pub foto_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usuarios_inscritos: Option<Vec<i64>>,
}

impl Actividad {
    pub fn esta_llena(&self) -> bool {
        self.lugares_disponibles <= 0
    }
}

/// Cuerpo de alta/edición de una actividad (ya validado)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ActividadPayload {
    pub titulo: String,
    pub descripcion: String,
    pub instructor: String,
    pub dia: String,
    pub hora_inicio: String,
    pub hora_fin: String,
    pub cupo: i64,
    pub foto_url: String,
    /// Solo viaja cuando el administrador completó la lista
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usuarios_inscritos: Option<Vec<i64>>,
}

/// Borrador del formulario de actividad. Todos los campos son texto
/// tal como los escribe el usuario.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct BorradorActividad {
    pub titulo: String,
    pub descripcion: String,
    pub instructor: String,
    pub dia: String,
    pub hora_inicio: String,
    pub hora_fin: String,
    pub cupo: String,
    pub foto_url: String,
    /// Ids de usuarios separados por coma; vacío no modifica la lista
    #[serde(default)]
    pub usuarios_inscritos: String,
}

impl BorradorActividad {
    /// Precarga el formulario de edición con una actividad existente
    pub fn desde_actividad(actividad: &Actividad) -> Self {
        Self {
            titulo: actividad.titulo.clone(),
            descripcion: actividad.descripcion.clone(),
            instructor: actividad.instructor.clone(),
            dia: actividad.dia.clone(),
            hora_inicio: actividad.hora_inicio.clone(),
            hora_fin: actividad.hora_fin.clone(),
            cupo: actividad.cupo.to_string(),
            foto_url: actividad.foto_url.clone(),
            usuarios_inscritos: actividad
                .usuarios_inscritos
                .iter()
                .flatten()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// Listados de actividades: `{"activities": [...], "count": n}` o un array
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListaActividades {
    Lista(Vec<Actividad>),
    Envuelta {
        #[serde(default)]
        activities: Vec<Actividad>,
    },
}

impl ListaActividades {
    pub fn into_vec(self) -> Vec<Actividad> {
        match self {
            ListaActividades::Envuelta { activities } => activities,
            ListaActividades::Lista(a) => a,
        }
    }
}

/// Alta, edición y detalle responden `{"activity": {...}}`; se acepta
/// también la actividad sin envolver
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RespuestaActividad {
    Envuelta { activity: Actividad },
    Directa(Actividad),
}

impl RespuestaActividad {
    pub fn into_actividad(self) -> Actividad {
        match self {
            RespuestaActividad::Envuelta { activity } => activity,
            RespuestaActividad::Directa(a) => a,
        }
    }
}

/// Conjunto de ids de actividades en las que está inscripto el usuario
pub type Inscripciones = HashSet<String>;

/// El endpoint de inscripciones responde un array o un objeto envoltorio
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RespuestaInscripciones {
    Lista(Vec<IdActividad>),
    Envuelta {
        #[serde(default)]
        inscripciones: Vec<IdActividad>,
    },
}

/// Los ids llegan como texto o como número según el backend
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum IdActividad {
    Texto(String),
    Numero(i64),
}

impl From<IdActividad> for String {
    fn from(id: IdActividad) -> Self {
        match id {
            IdActividad::Texto(s) => s,
            IdActividad::Numero(n) => n.to_string(),
        }
    }
}

impl RespuestaInscripciones {
    pub fn into_set(self) -> Inscripciones {
        let ids = match self {
            RespuestaInscripciones::Lista(ids) => ids,
            RespuestaInscripciones::Envuelta { inscripciones } => inscripciones,
        };
        ids.into_iter().map(String::from).collect()
    }
}

/// Estadísticas agregadas para el panel de administración
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Estadisticas {
    #[serde(default)]
    pub total_actividades: i64,
    #[serde(default)]
    pub total_inscripciones: i64,
    #[serde(default)]
    pub utilizacion_capacidad: f64,
    #[serde(default)]
    pub tasa_promedio_inscripcion: f64,
    #[serde(default)]
    pub actividades_llenas: i64,
    #[serde(default)]
    pub actividades_disponibles: i64,
}

/// Parámetros de la búsqueda paginada en el servidor
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct FiltrosBusqueda {
    pub titulo: String,
    pub descripcion: String,
    pub dia: String,
    pub page: Option<u32>,
    pub count: Option<u32>,
}

/// Resultado del motor de búsqueda tal como viaja por la red
#[derive(Debug, Deserialize)]
pub struct ActividadBusqueda {
    #[serde(default)]
    pub id: Option<IdActividad>,
    #[serde(default)]
    pub id_actividad: Option<IdActividad>,
    #[serde(default)]
    pub titulo: String,
    #[serde(default)]
    pub descripcion: String,
    #[serde(default)]
    pub instructor: String,
    #[serde(default)]
    pub dia: String,
    #[serde(default)]
    pub hora_inicio: String,
    #[serde(default)]
    pub hora_fin: String,
    #[serde(default)]
    pub cupo: i64,
    #[serde(default)]
    pub lugares_disponibles: i64,
    #[serde(default)]
    pub foto_url: String,
}

impl From<ActividadBusqueda> for Actividad {
    fn from(a: ActividadBusqueda) -> Self {
        // El buscador publica `id`; el resto del cliente trabaja con `id_actividad`
        let id = a.id.or(a.id_actividad).map(String::from).unwrap_or_default();
        Actividad {
            id_actividad: id,
            titulo: a.titulo,
            descripcion: a.descripcion,
            instructor: a.instructor,
            dia: a.dia,
            hora_inicio: a.hora_inicio,
            hora_fin: a.hora_fin,
            cupo: a.cupo,
            lugares_disponibles: a.lugares_disponibles,
            foto_url: a.foto_url,
            usuarios_inscritos: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RespuestaBusquedaCruda {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub results: Vec<ActividadBusqueda>,
}

/// Ventana de resultados paginada por el servidor
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct RespuestaBusqueda {
    pub page: u32,
    pub count: u32,
    pub total: u64,
    pub results: Vec<Actividad>,
}

impl From<RespuestaBusquedaCruda> for RespuestaBusqueda {
    fn from(r: RespuestaBusquedaCruda) -> Self {
        Self {
            page: r.page,
            count: r.count,
            total: r.total,
            results: r.results.into_iter().map(Actividad::from).collect(),
        }
    }
}
