//! Validación de formularios.
//!
//! Los validadores son funciones puras: reciben un borrador y devuelven un
//! mapa campo -> mensaje con solo los campos que fallaron. Un mapa vacío
//! significa que el formulario se puede enviar.

pub mod actividad;
pub mod usuario;

use std::collections::BTreeMap;
use std::future::Future;

use crate::error::AppError;

pub use actividad::{validar_actividad, validar_y_convertir_actividad};
pub use usuario::{validar_usuario, ModoFormulario};

pub type ErroresFormulario = BTreeMap<String, String>;

pub fn hay_errores(errores: &ErroresFormulario) -> bool {
    !errores.is_empty()
}

/// Estado de un formulario: datos en edición, errores por campo y el error
/// del último envío.
#[derive(Debug, Clone)]
pub struct Formulario<B> {
    pub datos: B,
    pub errores: ErroresFormulario,
    pub error_envio: Option<String>,
    inicial: B,
}

impl<B: Clone> Formulario<B> {
    pub fn new(inicial: B) -> Self {
        Self {
            datos: inicial.clone(),
            errores: ErroresFormulario::new(),
            error_envio: None,
            inicial,
        }
    }

    /// Modifica un campo y limpia su error, si lo tenía
    pub fn cambiar(&mut self, campo: &str, editar: impl FnOnce(&mut B)) {
        editar(&mut self.datos);
        self.errores.remove(campo);
    }

    pub fn actualizar(&mut self, datos: B) {
        self.datos = datos;
    }

    pub fn validar(&mut self, validador: impl Fn(&B) -> ErroresFormulario) -> bool {
        self.errores = validador(&self.datos);
        !hay_errores(&self.errores)
    }

    /// Valida y, solo si no hay errores, ejecuta la acción de envío
    pub async fn enviar<T, F, Fut>(
        &mut self,
        validador: impl Fn(&B) -> ErroresFormulario,
        accion: F,
    ) -> Result<T, AppError>
    where
        F: FnOnce(B) -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        self.error_envio = None;

        if !self.validar(validador) {
            return Err(AppError::Validacion(self.errores.clone()));
        }

        match accion(self.datos.clone()).await {
            Ok(valor) => Ok(valor),
            Err(e) => {
                self.error_envio = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn reiniciar(&mut self) {
        self.datos = self.inicial.clone();
        self.errores.clear();
        self.error_envio = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BorradorActividad;
    use std::cell::Cell;

    fn borrador_valido() -> BorradorActividad {
        BorradorActividad {
            titulo: "Yoga".to_string(),
            descripcion: "Yoga para principiantes".to_string(),
            instructor: "Ana".to_string(),
            dia: "Lunes".to_string(),
            hora_inicio: "08:00".to_string(),
            hora_fin: "09:00".to_string(),
            cupo: "10".to_string(),
            foto_url: String::new(),
            usuarios_inscritos: String::new(),
        }
    }

    #[tokio::test]
    async fn test_enviar_no_ejecuta_accion_si_hay_errores() {
        let mut form = Formulario::new(borrador_valido());
        form.cambiar("titulo", |b| b.titulo = "Yo".to_string());

        let llamadas = Cell::new(0);
        let res = form
            .enviar(validar_actividad, |_| async {
                llamadas.set(llamadas.get() + 1);
                Ok::<_, AppError>(())
            })
            .await;

        assert!(matches!(res, Err(AppError::Validacion(ref e)) if e.contains_key("titulo")));
        assert_eq!(llamadas.get(), 0);
        assert!(form.errores.contains_key("titulo"));
    }

    #[tokio::test]
    async fn test_enviar_ejecuta_accion_valida() {
        let mut form = Formulario::new(borrador_valido());
        let res = form
            .enviar(validar_actividad, |datos| async move {
                Ok::<_, AppError>(datos.titulo)
            })
            .await;
        assert_eq!(res.unwrap(), "Yoga");
        assert!(form.errores.is_empty());
    }

    #[tokio::test]
    async fn test_error_de_envio_queda_registrado() {
        let mut form = Formulario::new(borrador_valido());
        let res: Result<(), AppError> = form
            .enviar(validar_actividad, |_| async {
                Err(AppError::Invariante("falló".to_string()))
            })
            .await;
        assert!(res.is_err());
        assert_eq!(form.error_envio.as_deref(), Some("falló"));
    }

    #[test]
    fn test_cambiar_limpia_error_del_campo() {
        let mut form = Formulario::new(BorradorActividad::default());
        assert!(!form.validar(validar_actividad));
        assert!(form.errores.contains_key("titulo"));
        assert!(form.errores.contains_key("cupo"));

        form.cambiar("titulo", |b| b.titulo = "Pilates".to_string());
        assert!(!form.errores.contains_key("titulo"));
        assert!(form.errores.contains_key("cupo"));

        form.reiniciar();
        assert!(form.errores.is_empty());
        assert_eq!(form.datos, BorradorActividad::default());
    }
}
