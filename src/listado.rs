//! Filtrado, ordenamiento y paginación en el cliente.
//!
//! Una sola canalización genérica para todas las tablas: cada entidad expone
//! sus columnas ordenables con [`Registro::campo`] y cada vista aporta su
//! propio filtro implementando [`Filtro`].

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::models::{Actividad, Inscripciones, Usuario};

/// Valor de una columna, usado solo para comparar
#[derive(Debug, Clone, PartialEq)]
pub enum ValorCampo<'a> {
    Texto(&'a str),
    Entero(i64),
    Booleano(bool),
}

impl ValorCampo<'_> {
    /// Los textos se comparan en minúsculas; tipos distintos empatan
    fn comparar(&self, otro: &ValorCampo<'_>) -> Ordering {
        match (self, otro) {
            (ValorCampo::Texto(a), ValorCampo::Texto(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (ValorCampo::Entero(a), ValorCampo::Entero(b)) => a.cmp(b),
            (ValorCampo::Booleano(a), ValorCampo::Booleano(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

pub trait Registro {
    fn campo(&self, nombre: &str) -> Option<ValorCampo<'_>>;
}

pub trait Filtro<T> {
    fn coincide(&self, item: &T) -> bool;

    /// Un filtro vacío deja pasar todo
    fn esta_vacio(&self) -> bool;
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direccion {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Ordenamiento {
    pub campo: Option<String>,
    pub direccion: Direccion,
}

impl Ordenamiento {
    pub fn por(campo: &str, direccion: Direccion) -> Self {
        Self {
            campo: Some(campo.to_string()),
            direccion,
        }
    }

    /// Elegir la misma columna ascendente la invierte; cualquier otro caso
    /// ordena ascendente por la columna elegida
    pub fn alternar(&mut self, campo: &str) {
        let misma = self.campo.as_deref() == Some(campo);
        self.direccion = if misma && self.direccion == Direccion::Asc {
            Direccion::Desc
        } else {
            Direccion::Asc
        };
        self.campo = Some(campo.to_string());
    }

    pub fn limpiar(&mut self) {
        *self = Self::default();
    }

    /// Ordena en el lugar. El sort es estable: los empates conservan el
    /// orden de entrada.
    pub fn aplicar<T: Registro>(&self, items: &mut [T]) {
        let Some(campo) = self.campo.as_deref() else {
            return;
        };
        items.sort_by(|a, b| {
            let orden = match (a.campo(campo), b.campo(campo)) {
                (Some(x), Some(y)) => x.comparar(&y),
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            };
            match self.direccion {
                Direccion::Asc => orden,
                Direccion::Desc => orden.reverse(),
            }
        });
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Paginacion {
    pub pagina: usize,
    pub tamano: usize,
}

impl Paginacion {
    pub fn new(tamano: usize) -> Self {
        Self {
            pagina: 1,
            tamano: tamano.max(1),
        }
    }

    pub fn en_pagina(pagina: usize, tamano: usize) -> Self {
        Self {
            pagina: pagina.max(1),
            tamano: tamano.max(1),
        }
    }

    pub fn total_paginas(&self, total: usize) -> usize {
        total.div_ceil(self.tamano.max(1))
    }

    pub fn rebanar<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let tamano = self.tamano.max(1);
        let inicio = (self.pagina.max(1) - 1).saturating_mul(tamano).min(items.len());
        let fin = inicio.saturating_add(tamano).min(items.len());
        &items[inicio..fin]
    }

    pub fn siguiente(&mut self, total_paginas: usize) {
        self.pagina = (self.pagina + 1).min(total_paginas).max(1);
    }

    pub fn anterior(&mut self) {
        self.pagina = self.pagina.saturating_sub(1).max(1);
    }

    pub fn reiniciar(&mut self) {
        self.pagina = 1;
    }
}

/// Una página ya recortada junto con los totales para la navegación
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Pagina<T> {
    pub items: Vec<T>,
    pub pagina: usize,
    pub total_paginas: usize,
    pub total: usize,
}

impl<T> Pagina<T> {
    /// Sin resultados no es un error: la vista muestra el estado vacío
    pub fn sin_resultados(&self) -> bool {
        self.total == 0
    }
}

/// Filtra, ordena (si hay columna elegida) y recorta la página pedida.
/// Una página fuera de rango se lleva a la última que existe.
pub fn procesar<T, F>(
    items: &[T],
    filtro: &F,
    orden: &Ordenamiento,
    paginacion: &Paginacion,
) -> Pagina<T>
where
    T: Registro + Clone,
    F: Filtro<T>,
{
    let mut filtrados: Vec<T> = items.iter().filter(|i| filtro.coincide(i)).cloned().collect();
    orden.aplicar(&mut filtrados);

    let total = filtrados.len();
    let total_paginas = paginacion.total_paginas(total);
    let pagina = Paginacion {
        pagina: paginacion.pagina.clamp(1, total_paginas.max(1)),
        tamano: paginacion.tamano,
    };
    Pagina {
        items: pagina.rebanar(&filtrados).to_vec(),
        pagina: pagina.pagina,
        total_paginas,
        total,
    }
}

/// Estado de una tabla: filtro, orden y página actuales
#[derive(Debug, Clone, PartialEq)]
pub struct ListadoEstado<F> {
    pub filtro: F,
    pub orden: Ordenamiento,
    pub paginacion: Paginacion,
}

impl<F: Default> ListadoEstado<F> {
    pub fn new(tamano_pagina: usize) -> Self {
        Self {
            filtro: F::default(),
            orden: Ordenamiento::default(),
            paginacion: Paginacion::new(tamano_pagina),
        }
    }

    /// Cualquier cambio de filtro vuelve a la primera página
    pub fn cambiar_filtro(&mut self, editar: impl FnOnce(&mut F)) {
        editar(&mut self.filtro);
        self.paginacion.reiniciar();
    }

    pub fn limpiar_filtros(&mut self) {
        self.filtro = F::default();
        self.paginacion.reiniciar();
    }

    pub fn ordenar_por(&mut self, campo: &str) {
        self.orden.alternar(campo);
        self.paginacion.reiniciar();
    }

    pub fn pagina<T>(&self, items: &[T]) -> Pagina<T>
    where
        T: Registro + Clone,
        F: Filtro<T>,
    {
        procesar(items, &self.filtro, &self.orden, &self.paginacion)
    }

    pub fn siguiente_pagina<T>(&mut self, items: &[T])
    where
        T: Registro + Clone,
        F: Filtro<T>,
    {
        let total = self.pagina(items).total_paginas;
        self.paginacion.siguiente(total);
    }

    pub fn pagina_anterior(&mut self) {
        self.paginacion.anterior();
    }

    /// Tras borrar un registro la tabla vuelve al orden del servidor
    pub fn despues_de_eliminar(&mut self) {
        self.orden.limpiar();
    }
}

fn contiene(texto: &str, buscado: &str) -> bool {
    buscado.is_empty() || texto.to_lowercase().contains(&buscado.to_lowercase())
}

impl Registro for Actividad {
    fn campo(&self, nombre: &str) -> Option<ValorCampo<'_>> {
        Some(match nombre {
            "id_actividad" => ValorCampo::Texto(&self.id_actividad),
            "titulo" => ValorCampo::Texto(&self.titulo),
            "descripcion" => ValorCampo::Texto(&self.descripcion),
            "instructor" => ValorCampo::Texto(&self.instructor),
            "dia" => ValorCampo::Texto(&self.dia),
            "hora_inicio" => ValorCampo::Texto(&self.hora_inicio),
            "hora_fin" => ValorCampo::Texto(&self.hora_fin),
            "cupo" => ValorCampo::Entero(self.cupo),
            "lugares_disponibles" => ValorCampo::Entero(self.lugares_disponibles),
            _ => return None,
        })
    }
}

impl Registro for Usuario {
    fn campo(&self, nombre: &str) -> Option<ValorCampo<'_>> {
        Some(match nombre {
            "id_usuario" => ValorCampo::Entero(self.id_usuario),
            "nombre" => ValorCampo::Texto(&self.nombre),
            "apellido" => ValorCampo::Texto(&self.apellido),
            "username" => ValorCampo::Texto(&self.username),
            "email" => ValorCampo::Texto(&self.email),
            "is_admin" => ValorCampo::Booleano(self.is_admin),
            _ => return None,
        })
    }
}

/// Criterios de la grilla de actividades
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct FiltroActividades {
    pub busqueda: String,
    pub descripcion: String,
    pub dia: String,
    pub solo_inscripto: bool,
    /// Inscripciones del usuario, necesarias solo para `solo_inscripto`
    #[serde(skip)]
    pub inscripciones: Inscripciones,
}

impl Filtro<Actividad> for FiltroActividades {
    fn coincide(&self, a: &Actividad) -> bool {
        contiene(&a.titulo, &self.busqueda)
            && contiene(&a.descripcion, &self.descripcion)
            && (self.dia.is_empty() || a.dia.to_lowercase() == self.dia.to_lowercase())
            && (!self.solo_inscripto || self.inscripciones.contains(&a.id_actividad))
    }

    fn esta_vacio(&self) -> bool {
        self.busqueda.is_empty()
            && self.descripcion.is_empty()
            && self.dia.is_empty()
            && !self.solo_inscripto
    }
}

/// Criterios de la tabla de usuarios del panel de administración
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct FiltroUsuarios {
    /// Se compara contra "nombre apellido"
    pub busqueda: String,
    pub email: String,
    pub username: String,
    pub es_admin: Option<bool>,
}

impl Filtro<Usuario> for FiltroUsuarios {
    fn coincide(&self, u: &Usuario) -> bool {
        let nombre_completo = format!("{} {}", u.nombre, u.apellido);
        contiene(&nombre_completo, &self.busqueda)
            && contiene(&u.email, &self.email)
            && contiene(&u.username, &self.username)
            && self.es_admin.map_or(true, |admin| u.is_admin == admin)
    }

    fn esta_vacio(&self) -> bool {
        self.busqueda.is_empty()
            && self.email.is_empty()
            && self.username.is_empty()
            && self.es_admin.is_none()
    }
}
