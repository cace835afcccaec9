use once_cell::sync::Lazy;
use regex::Regex;

use super::ErroresFormulario;
use crate::models::{BorradorUsuario, NuevoUsuario, UsuarioActualizado};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("patrón de email inválido"));

/// Alta (registro o creación por admin) o edición de un usuario existente
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModoFormulario {
    Crear,
    Editar,
}

pub fn validar_usuario(b: &BorradorUsuario, modo: ModoFormulario) -> ErroresFormulario {
    let mut errores = ErroresFormulario::new();
    let mut error = |campo: &str, msg: &str| {
        errores.insert(campo.to_string(), msg.to_string());
    };

    let nombre = b.nombre.trim();
    if nombre.is_empty() {
        error("nombre", "El nombre es requerido");
    } else if nombre.chars().count() < 2 {
        error("nombre", "El nombre debe tener al menos 2 caracteres");
    }

    let apellido = b.apellido.trim();
    if apellido.is_empty() {
        error("apellido", "El apellido es requerido");
    } else if apellido.chars().count() < 2 {
        error("apellido", "El apellido debe tener al menos 2 caracteres");
    }

    let email = b.email.trim();
    if email.is_empty() {
        error("email", "El email es requerido");
    } else if !EMAIL_RE.is_match(email) {
        error("email", "El email no es válido");
    }

    match modo {
        ModoFormulario::Crear => {
            let username = b.username.trim();
            if username.is_empty() {
                error("username", "El nombre de usuario es requerido");
            } else if username.chars().count() < 3 {
                error("username", "El nombre de usuario debe tener al menos 3 caracteres");
            }

            if b.password.is_empty() {
                error("password", "La contraseña es requerida");
            } else if let Some(msg) = debilidad_password(&b.password) {
                error("password", msg);
            }

            if let Some(confirmacion) = &b.confirm_password {
                if *confirmacion != b.password {
                    error("confirm_password", "Las contraseñas no coinciden");
                }
            }
        }
        ModoFormulario::Editar => {
            let hay_password = !b.password.trim().is_empty();
            let hay_confirmacion = b
                .confirm_password
                .as_deref()
                .map(|c| !c.trim().is_empty())
                .unwrap_or(false);

            if hay_password {
                if let Some(msg) = debilidad_password(&b.password) {
                    error("password", msg);
                }
            }

            // Solo aplica cuando el formulario trae el campo de confirmación
            if b.confirm_password.is_some() {
                match (hay_password, hay_confirmacion) {
                    (true, false) => error("confirm_password", "Debe confirmar la contraseña"),
                    (false, true) => {
                        error("password", "Debe ingresar la contraseña que desea confirmar")
                    }
                    (true, true) if b.confirm_password.as_deref() != Some(b.password.as_str()) => {
                        error("confirm_password", "Las contraseñas no coinciden")
                    }
                    _ => {}
                }
            }
        }
    }

    errores
}

/// Longitud mínima 6 y al menos una minúscula, una mayúscula y un dígito
fn debilidad_password(password: &str) -> Option<&'static str> {
    if password.chars().count() < 6 {
        return Some("La contraseña debe tener al menos 6 caracteres");
    }
    let minuscula = password.chars().any(|c| c.is_lowercase());
    let mayuscula = password.chars().any(|c| c.is_uppercase());
    let digito = password.chars().any(|c| c.is_ascii_digit());
    if !(minuscula && mayuscula && digito) {
        return Some("La contraseña debe incluir una minúscula, una mayúscula y un número");
    }
    None
}

impl From<&BorradorUsuario> for NuevoUsuario {
    fn from(b: &BorradorUsuario) -> Self {
        NuevoUsuario {
            nombre: b.nombre.trim().to_string(),
            apellido: b.apellido.trim().to_string(),
            username: b.username.trim().to_string(),
            email: b.email.trim().to_string(),
            password: b.password.clone(),
            is_admin: b.is_admin,
        }
    }
}

impl From<&BorradorUsuario> for UsuarioActualizado {
    fn from(b: &BorradorUsuario) -> Self {
        UsuarioActualizado {
            nombre: b.nombre.trim().to_string(),
            apellido: b.apellido.trim().to_string(),
            email: b.email.trim().to_string(),
            is_admin: b.is_admin,
            password: Some(b.password.clone()).filter(|p| !p.trim().is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alta(password: &str) -> BorradorUsuario {
        BorradorUsuario {
            nombre: "Lucía".to_string(),
            apellido: "Pérez".to_string(),
            email: "lucia@gimnasio.com".to_string(),
            username: "lucia".to_string(),
            password: password.to_string(),
            confirm_password: None,
            is_admin: false,
        }
    }

    #[test]
    fn test_alta_valida() {
        assert!(validar_usuario(&alta("Abc123"), ModoFormulario::Crear).is_empty());
    }

    #[test]
    fn test_password_debil() {
        let e = validar_usuario(&alta("abcdef"), ModoFormulario::Crear);
        assert!(e.contains_key("password"));
        let e = validar_usuario(&alta("Ab1"), ModoFormulario::Crear);
        assert_eq!(e["password"], "La contraseña debe tener al menos 6 caracteres");
        let e = validar_usuario(&alta("ABCDEF1"), ModoFormulario::Crear);
        assert!(e.contains_key("password"));
        let e = validar_usuario(&alta(""), ModoFormulario::Crear);
        assert_eq!(e["password"], "La contraseña es requerida");
    }

    #[test]
    fn test_confirmacion_en_alta() {
        let mut b = alta("Abc123");
        b.confirm_password = Some("Abc124".to_string());
        assert!(validar_usuario(&b, ModoFormulario::Crear).contains_key("confirm_password"));
        b.confirm_password = Some("Abc123".to_string());
        assert!(validar_usuario(&b, ModoFormulario::Crear).is_empty());
    }

    #[test]
    fn test_campos_personales() {
        let mut b = alta("Abc123");
        b.nombre = "L".to_string();
        b.apellido = " ".to_string();
        b.email = "lucia@gimnasio".to_string();
        b.username = "lu".to_string();
        let e = validar_usuario(&b, ModoFormulario::Crear);
        assert_eq!(e["nombre"], "El nombre debe tener al menos 2 caracteres");
        assert_eq!(e["apellido"], "El apellido es requerido");
        assert_eq!(e["email"], "El email no es válido");
        assert!(e.contains_key("username"));
    }

    #[test]
    fn test_edicion_ignora_username_y_password_vacia() {
        let mut b = alta("");
        b.username.clear();
        assert!(validar_usuario(&b, ModoFormulario::Editar).is_empty());
    }

    #[test]
    fn test_edicion_password_opcional_con_fuerza() {
        let b = alta("abcdef");
        assert!(validar_usuario(&b, ModoFormulario::Editar).contains_key("password"));
        let b = alta("Xyz789");
        assert!(validar_usuario(&b, ModoFormulario::Editar).is_empty());
    }

    #[test]
    fn test_edicion_confirmacion() {
        let mut b = alta("Xyz789");
        b.confirm_password = Some(String::new());
        assert_eq!(
            validar_usuario(&b, ModoFormulario::Editar)["confirm_password"],
            "Debe confirmar la contraseña"
        );

        let mut b = alta("");
        b.confirm_password = Some("Xyz789".to_string());
        assert!(validar_usuario(&b, ModoFormulario::Editar).contains_key("password"));

        let mut b = alta("Xyz789");
        b.confirm_password = Some("Xyz788".to_string());
        assert_eq!(
            validar_usuario(&b, ModoFormulario::Editar)["confirm_password"],
            "Las contraseñas no coinciden"
        );

        b.confirm_password = Some("Xyz789".to_string());
        assert!(validar_usuario(&b, ModoFormulario::Editar).is_empty());
    }

    #[test]
    fn test_conversiones() {
        let mut b = alta("Abc123");
        b.nombre = "  Lucía ".to_string();
        let nuevo = NuevoUsuario::from(&b);
        assert_eq!(nuevo.nombre, "Lucía");

        b.password = "  ".to_string();
        let upd = UsuarioActualizado::from(&b);
        assert_eq!(upd.password, None);
    }
}
