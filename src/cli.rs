//! Línea de comandos del cliente del gimnasio.
//!
//! Cada subcomando llama a una operación de [`crate::commands`] y devuelve
//! JSON; el binario lo imprime en stdout.

use clap::{Args, Parser, Subcommand};
use serde_json::{json, Value};

use crate::commands::{actividades, busqueda, sesion, usuarios, Estado};
use crate::constantes::*;
use crate::error::AppError;
use crate::listado::{Direccion, FiltroActividades, FiltroUsuarios, Ordenamiento, Paginacion};
use crate::models::{BorradorActividad, BorradorUsuario, FiltrosBusqueda};
use crate::servicios::ResultadoBusqueda;

/// Cliente de actividades del gimnasio
#[derive(Parser, Debug)]
#[command(name = "gimnasio")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub comando: Comando,
}

#[derive(Subcommand, Debug)]
pub enum Comando {
    /// Inicia sesión y guarda el token
    Login {
        username: String,
        #[arg(long)]
        password: String,
    },

    /// Crea una cuenta nueva e inicia sesión
    Registrar {
        #[command(flatten)]
        datos: ArgsUsuario,
        #[arg(long)]
        confirm_password: Option<String>,
    },

    /// Cierra la sesión y borra el token guardado
    Logout,

    /// Muestra la sesión derivada del token
    Sesion {
        /// Revisa el token guardado y lo borra si expiró
        #[arg(long)]
        verificar: bool,
    },

    /// Consulta al servidor si la sesión es de administrador
    EsAdmin,

    /// Lista actividades con filtro, orden y paginación locales
    Actividades {
        #[command(flatten)]
        filtro: ArgsFiltroActividades,
        #[command(flatten)]
        orden: ArgsOrden,
        #[arg(long, default_value_t = 1)]
        pagina: usize,
        /// Por defecto 9, o 5 en la tabla de administración
        #[arg(long)]
        tamano: Option<usize>,
        /// Tabla del panel de administración
        #[arg(long)]
        admin: bool,
    },

    /// Búsqueda paginada en el servidor
    Buscar {
        #[arg(long, default_value = "")]
        titulo: String,
        #[arg(long, default_value = "")]
        descripcion: String,
        #[arg(long, default_value = "")]
        dia: String,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        count: Option<u32>,
    },

    /// Detalle de una actividad
    Actividad { id: String },

    CrearActividad {
        #[command(flatten)]
        datos: ArgsActividad,
    },

    /// Edita una actividad; los campos omitidos conservan su valor actual
    EditarActividad {
        id: String,
        #[command(flatten)]
        datos: ArgsActividad,
    },

    EliminarActividad { id: String },

    Inscribir { id: String },

    Desinscribir { id: String },

    /// Actividades en las que está inscripto el usuario de la sesión
    MisActividades,

    /// Tabla de usuarios del panel de administración
    Usuarios {
        #[command(flatten)]
        filtro: ArgsFiltroUsuarios,
        #[command(flatten)]
        orden: ArgsOrden,
        #[arg(long, default_value_t = 1)]
        pagina: usize,
        #[arg(long, default_value_t = ITEMS_POR_PAGINA_USUARIOS)]
        tamano: usize,
    },

    CrearUsuario {
        #[command(flatten)]
        datos: ArgsUsuario,
        #[arg(long)]
        admin: bool,
    },

    /// Edita un usuario; los campos omitidos conservan su valor actual y
    /// la contraseña solo cambia si se indica una nueva
    EditarUsuario {
        id: i64,
        #[arg(long, default_value = "")]
        nombre: String,
        #[arg(long, default_value = "")]
        apellido: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        password: String,
        #[arg(long)]
        confirm_password: Option<String>,
        /// true o false; sin valor conserva el rol
        #[arg(long)]
        admin: Option<bool>,
    },

    EliminarUsuario { id: i64 },

    /// Estadísticas del panel de administración
    Estadisticas,
}

#[derive(Args, Debug, Clone)]
pub struct ArgsActividad {
    #[arg(long, default_value = "")]
    pub titulo: String,
    #[arg(long, default_value = "")]
    pub descripcion: String,
    #[arg(long, default_value = "")]
    pub instructor: String,
    #[arg(long, default_value = "")]
    pub dia: String,
    #[arg(long, default_value = "")]
    pub hora_inicio: String,
    #[arg(long, default_value = "")]
    pub hora_fin: String,
    #[arg(long, default_value = "")]
    pub cupo: String,
    #[arg(long, default_value = "")]
    pub foto_url: String,
    /// Ids de usuarios separados por coma
    #[arg(long, default_value = "")]
    pub usuarios_inscritos: String,
}

impl ArgsActividad {
    /// Pisa sobre `base` solo los campos indicados en la línea de comandos
    fn sobre(self, mut base: BorradorActividad) -> BorradorActividad {
        let campos = [
            (self.titulo, &mut base.titulo),
            (self.descripcion, &mut base.descripcion),
            (self.instructor, &mut base.instructor),
            (self.dia, &mut base.dia),
            (self.hora_inicio, &mut base.hora_inicio),
            (self.hora_fin, &mut base.hora_fin),
            (self.cupo, &mut base.cupo),
            (self.foto_url, &mut base.foto_url),
            (self.usuarios_inscritos, &mut base.usuarios_inscritos),
        ];
        for (nuevo, actual) in campos {
            if !nuevo.is_empty() {
                *actual = nuevo;
            }
        }
        base
    }
}

impl From<ArgsActividad> for BorradorActividad {
    fn from(a: ArgsActividad) -> Self {
        a.sobre(BorradorActividad::default())
    }
}

#[derive(Args, Debug, Clone)]
pub struct ArgsUsuario {
    #[arg(long, default_value = "")]
    pub nombre: String,
    #[arg(long, default_value = "")]
    pub apellido: String,
    #[arg(long, default_value = "")]
    pub username: String,
    #[arg(long, default_value = "")]
    pub email: String,
    #[arg(long, default_value = "")]
    pub password: String,
}

impl ArgsUsuario {
    fn borrador(self, confirm_password: Option<String>, is_admin: bool) -> BorradorUsuario {
        BorradorUsuario {
            nombre: self.nombre,
            apellido: self.apellido,
            email: self.email,
            username: self.username,
            password: self.password,
            confirm_password,
            is_admin,
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct ArgsFiltroActividades {
    #[arg(long, default_value = "")]
    pub busqueda: String,
    #[arg(long = "filtro-descripcion", default_value = "")]
    pub descripcion: String,
    #[arg(long = "filtro-dia", default_value = "")]
    pub dia: String,
    #[arg(long)]
    pub solo_inscripto: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ArgsFiltroUsuarios {
    #[arg(long, default_value = "")]
    pub busqueda: String,
    #[arg(long = "filtro-email", default_value = "")]
    pub email: String,
    #[arg(long = "filtro-username", default_value = "")]
    pub username: String,
    /// true o false; sin valor no filtra por rol
    #[arg(long)]
    pub es_admin: Option<bool>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ArgsOrden {
    /// Columna por la que ordenar
    #[arg(long)]
    pub orden: Option<String>,
    #[arg(long)]
    pub desc: bool,
}

impl From<ArgsOrden> for Ordenamiento {
    fn from(a: ArgsOrden) -> Self {
        match a.orden {
            Some(campo) => {
                let direccion = if a.desc { Direccion::Desc } else { Direccion::Asc };
                Ordenamiento::por(&campo, direccion)
            }
            None => Ordenamiento::default(),
        }
    }
}

/// Ejecuta un subcomando y arma la salida JSON
pub async fn ejecutar(estado: &Estado, comando: Comando) -> Result<Value, AppError> {
    let salida = match comando {
        Comando::Login { username, password } => {
            serde_json::to_value(sesion::iniciar_sesion(estado, &username, &password).await?)?
        }
        Comando::Registrar {
            datos,
            confirm_password,
        } => {
            let borrador = datos.borrador(confirm_password, false);
            serde_json::to_value(sesion::registrar(estado, &borrador).await?)?
        }
        Comando::Logout => {
            sesion::cerrar_sesion(estado)?;
            json!({ "mensaje": OK_SESION_CERRADA })
        }
        Comando::Sesion { verificar } => {
            if verificar {
                json!({ "token": sesion::verificar_token(estado)? })
            } else {
                let mut salida = serde_json::to_value(sesion::obtener_sesion_actual(estado)?)?;
                salida["segundos_restantes"] = json!(sesion::segundos_restantes(estado)?);
                salida
            }
        }
        Comando::EsAdmin => json!({ "es_admin": sesion::verificar_admin(estado).await? }),
        Comando::Actividades {
            filtro,
            orden,
            pagina,
            tamano,
            admin,
        } => {
            let filtro = FiltroActividades {
                busqueda: filtro.busqueda,
                descripcion: filtro.descripcion,
                dia: filtro.dia,
                solo_inscripto: filtro.solo_inscripto,
                ..Default::default()
            };
            let pagina = actividades::listar_actividades(
                estado,
                filtro,
                &orden.into(),
                &Paginacion::en_pagina(pagina, tamano_actividades(tamano, admin)),
            )
            .await?;
            serde_json::to_value(pagina)?
        }
        Comando::Buscar {
            titulo,
            descripcion,
            dia,
            page,
            count,
        } => {
            let filtros = FiltrosBusqueda {
                titulo,
                descripcion,
                dia,
                page,
                count,
            };
            match busqueda::buscar_actividades(estado, filtros).await? {
                ResultadoBusqueda::Aplicada(r) => serde_json::to_value(r)?,
                ResultadoBusqueda::Descartada => json!({ "descartada": true }),
            }
        }
        Comando::Actividad { id } => {
            serde_json::to_value(actividades::obtener_actividad(estado, &id).await?)?
        }
        Comando::CrearActividad { datos } => {
            let creada = actividades::crear_actividad(estado, &datos.into()).await?;
            json!({ "mensaje": OK_ACTIVIDAD_CREADA, "actividad": creada })
        }
        Comando::EditarActividad { id, datos } => {
            let actual = actividades::obtener_actividad(estado, &id).await?;
            let borrador = datos.sobre(BorradorActividad::desde_actividad(&actual));
            let actualizada = actividades::actualizar_actividad(estado, &id, &borrador).await?;
            json!({ "mensaje": OK_ACTIVIDAD_ACTUALIZADA, "actividad": actualizada })
        }
        Comando::EliminarActividad { id } => {
            actividades::eliminar_actividad(estado, &id).await?;
            json!({ "mensaje": OK_ACTIVIDAD_ELIMINADA })
        }
        Comando::Inscribir { id } => {
            let inscripciones = actividades::inscribir(estado, &id).await?;
            json!({ "mensaje": OK_INSCRIPCION, "inscripciones": ordenadas(inscripciones) })
        }
        Comando::Desinscribir { id } => {
            let inscripciones = actividades::desinscribir(estado, &id).await?;
            json!({ "mensaje": OK_DESINSCRIPCION, "inscripciones": ordenadas(inscripciones) })
        }
        Comando::MisActividades => {
            serde_json::to_value(actividades::mis_actividades(estado).await?)?
        }
        Comando::Usuarios {
            filtro,
            orden,
            pagina,
            tamano,
        } => {
            let filtro = FiltroUsuarios {
                busqueda: filtro.busqueda,
                email: filtro.email,
                username: filtro.username,
                es_admin: filtro.es_admin,
            };
            let pagina = usuarios::listar_usuarios(
                estado,
                &filtro,
                &orden.into(),
                &Paginacion::en_pagina(pagina, tamano),
            )
            .await?;
            serde_json::to_value(pagina)?
        }
        Comando::CrearUsuario { datos, admin } => {
            let borrador = datos.borrador(None, admin);
            usuarios::crear_usuario(estado, &borrador).await?;
            json!({ "mensaje": OK_USUARIO_CREADO, "username": borrador.username })
        }
        Comando::EditarUsuario {
            id,
            nombre,
            apellido,
            email,
            password,
            confirm_password,
            admin,
        } => {
            let actual = usuarios::obtener_usuario(estado, id).await?;
            let mut borrador = BorradorUsuario::desde_usuario(&actual);
            for (nuevo, campo) in [
                (nombre, &mut borrador.nombre),
                (apellido, &mut borrador.apellido),
                (email, &mut borrador.email),
            ] {
                if !nuevo.is_empty() {
                    *campo = nuevo;
                }
            }
            borrador.password = password;
            borrador.confirm_password = confirm_password;
            if let Some(admin) = admin {
                borrador.is_admin = admin;
            }
            usuarios::actualizar_usuario(estado, id, &borrador).await?;
            json!({ "mensaje": OK_USUARIO_ACTUALIZADO })
        }
        Comando::EliminarUsuario { id } => {
            usuarios::eliminar_usuario(estado, id).await?;
            json!({ "mensaje": OK_USUARIO_ELIMINADO })
        }
        Comando::Estadisticas => serde_json::to_value(actividades::estadisticas(estado).await?)?,
    };
    Ok(salida)
}

fn tamano_actividades(tamano: Option<usize>, admin: bool) -> usize {
    tamano.unwrap_or(if admin {
        ITEMS_POR_PAGINA_ADMIN_ACTIVIDADES
    } else {
        ITEMS_POR_PAGINA_ACTIVIDADES
    })
}

/// Salida estable para el conjunto de inscripciones
fn ordenadas(inscripciones: crate::models::Inscripciones) -> Vec<String> {
    let mut v: Vec<String> = inscripciones.into_iter().collect();
    v.sort();
    v
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_valida() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parseo_actividades() {
        let cli = Cli::try_parse_from([
            "gimnasio",
            "actividades",
            "--busqueda",
            "yoga",
            "--filtro-dia",
            "Lunes",
            "--orden",
            "cupo",
            "--desc",
            "--pagina",
            "2",
        ])
        .unwrap();
        match cli.comando {
            Comando::Actividades {
                filtro,
                orden,
                pagina,
                tamano,
                admin,
            } => {
                assert_eq!(filtro.busqueda, "yoga");
                assert_eq!(filtro.dia, "Lunes");
                assert_eq!(pagina, 2);
                assert_eq!(tamano_actividades(tamano, admin), 9);
                assert_eq!(Ordenamiento::from(orden), Ordenamiento::por("cupo", Direccion::Desc));
            }
            otro => panic!("comando inesperado: {:?}", otro),
        }
    }

    #[test]
    fn test_parseo_crear_actividad() {
        let cli = Cli::try_parse_from([
            "gimnasio",
            "crear-actividad",
            "--titulo",
            "Yoga",
            "--hora-inicio",
            "08:00",
            "--cupo",
            "10",
        ])
        .unwrap();
        let Comando::CrearActividad { datos } = cli.comando else {
            panic!("se esperaba crear-actividad");
        };
        let b = BorradorActividad::from(datos);
        assert_eq!(b.titulo, "Yoga");
        assert_eq!(b.hora_inicio, "08:00");
        assert_eq!(b.cupo, "10");
        assert_eq!(b.foto_url, "");
        assert_eq!(b.usuarios_inscritos, "");
    }

    #[test]
    fn test_tamano_de_pagina_admin() {
        let cli = Cli::try_parse_from(["gimnasio", "actividades", "--admin"]).unwrap();
        let Comando::Actividades { tamano, admin, .. } = cli.comando else {
            panic!("se esperaba actividades");
        };
        assert_eq!(tamano_actividades(tamano, admin), ITEMS_POR_PAGINA_ADMIN_ACTIVIDADES);
        assert_eq!(tamano_actividades(Some(3), true), 3);
    }

    #[test]
    fn test_editar_conserva_campos_omitidos() {
        let cli = Cli::try_parse_from([
            "gimnasio",
            "editar-actividad",
            "a1",
            "--cupo",
            "20",
            "--usuarios-inscritos",
            "3,8",
        ])
        .unwrap();
        let Comando::EditarActividad { id, datos } = cli.comando else {
            panic!("se esperaba editar-actividad");
        };
        assert_eq!(id, "a1");
        let actual = BorradorActividad {
            titulo: "Yoga".to_string(),
            cupo: "10".to_string(),
            ..Default::default()
        };
        let b = datos.sobre(actual);
        assert_eq!(b.titulo, "Yoga");
        assert_eq!(b.cupo, "20");
        assert_eq!(b.usuarios_inscritos, "3,8");
    }

    #[test]
    fn test_parseo_usuarios_por_rol() {
        let cli = Cli::try_parse_from(["gimnasio", "usuarios", "--es-admin", "false"]).unwrap();
        let Comando::Usuarios { filtro, tamano, .. } = cli.comando else {
            panic!("se esperaba usuarios");
        };
        assert_eq!(filtro.es_admin, Some(false));
        assert_eq!(tamano, 5);
    }
}
