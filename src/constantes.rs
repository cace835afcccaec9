/// Días válidos para una actividad, en el orden en que se muestran
pub const DIAS_SEMANA: [&str; 7] = [
    "Lunes",
    "Martes",
    "Miércoles",
    "Jueves",
    "Viernes",
    "Sábado",
    "Domingo",
];

pub const ITEMS_POR_PAGINA_ACTIVIDADES: usize = 9;
pub const ITEMS_POR_PAGINA_ADMIN_ACTIVIDADES: usize = 5;
pub const ITEMS_POR_PAGINA_USUARIOS: usize = 5;

// Mensajes de error por operación
pub const ERROR_FETCH_ACTIVIDADES: &str = "Error al cargar las actividades";
pub const ERROR_FETCH_ACTIVIDAD: &str = "Error al cargar la actividad";
pub const ERROR_FETCH_INSCRIPCIONES: &str = "Error al cargar las inscripciones";
pub const ERROR_CREATE_ACTIVIDAD: &str = "Error al crear la actividad";
pub const ERROR_UPDATE_ACTIVIDAD: &str = "Error al actualizar la actividad";
pub const ERROR_DELETE_ACTIVIDAD: &str = "Error al eliminar la actividad";
pub const ERROR_ENROLL_ACTIVIDAD: &str = "Error al inscribirse en la actividad";
pub const ERROR_UNENROLL_ACTIVIDAD: &str = "Error al desinscribirse de la actividad";
pub const ERROR_ESTADISTICAS: &str = "Error al cargar las estadísticas";
pub const ERROR_BUSQUEDA: &str = "Error al buscar actividades";
pub const ERROR_FETCH_USUARIOS: &str = "Error al cargar los usuarios";
pub const ERROR_FETCH_USUARIO: &str = "Error al cargar el usuario";
pub const ERROR_CREATE_USUARIO: &str = "Error al crear el usuario";
pub const ERROR_UPDATE_USUARIO: &str = "Error al actualizar el usuario";
pub const ERROR_DELETE_USUARIO: &str = "Error al eliminar el usuario";
pub const ERROR_LOGIN: &str = "Usuario o contraseña incorrectos";
pub const ERROR_REGISTRO: &str = "Error al registrar usuario";
pub const ERROR_AUTH: &str = "Se necesita autenticación válida";
pub const ERROR_VALIDACION: &str = "Por favor revisa los campos del formulario";
pub const ERROR_RED: &str = "Error de conexión. Intenta más tarde";
pub const ERROR_SIN_SESION: &str = "No hay sesión activa. Por favor, inicie sesión nuevamente.";
pub const ERROR_SESION_EXPIRADA: &str =
    "Tu sesión ha expirado. Por favor, inicia sesión nuevamente.";

// Mensajes de éxito
pub const OK_ACTIVIDAD_CREADA: &str = "Actividad creada exitosamente";
pub const OK_ACTIVIDAD_ACTUALIZADA: &str = "Actividad actualizada exitosamente";
pub const OK_ACTIVIDAD_ELIMINADA: &str = "Actividad eliminada exitosamente";
pub const OK_INSCRIPCION: &str = "¡Te has inscripto a la actividad!";
pub const OK_DESINSCRIPCION: &str = "Te has desinscripto de la actividad";
pub const OK_USUARIO_CREADO: &str = "Usuario creado exitosamente";
pub const OK_USUARIO_ACTUALIZADO: &str = "Usuario actualizado exitosamente";
pub const OK_USUARIO_ELIMINADO: &str = "El usuario se ha eliminado exitosamente";
pub const OK_SESION_CERRADA: &str = "Sesión cerrada";
