//! Implementación Postgres (Diesel) del puerto `BlueprintPersistence`.
//!
//! Modelo de dos tablas:
//! - `blueprints(id, author, name)` con `UNIQUE(author, name)`.
//! - `points(id, x, y, point_order, blueprint_id)` con FK `ON DELETE CASCADE`
//!   y `UNIQUE(blueprint_id, point_order)`.
//!
//! Decisiones:
//! - La unicidad la decide el constraint; no hay consulta previa de
//!   existencia. Un `UniqueViolation` al insertar se traduce a `Duplicate`.
//! - El orden de los puntos se guarda explícitamente en `point_order` y toda
//!   lectura ordena por esa columna.
//! - `add_point` bloquea la fila padre (`FOR UPDATE`) y calcula
//!   `max(point_order) + 1` dentro de la misma transacción del insert.
//! - Las lecturas de varios blueprints cargan todos los puntos en una sola
//!   consulta ordenada por `(blueprint_id, point_order)` y los agrupan.

use std::collections::HashMap;

use bp_core::{BlueprintError, BlueprintPersistence};
use bp_domain::{Blueprint, Point};
use diesel::dsl::max;
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager};
use log::{debug, error, info, warn};

use crate::error::PersistenceError;
use crate::migrations::run_pending_migrations;
use crate::schema::{blueprints, points};

/// Alias de tipo para el pool r2d2 de conexiones Postgres.
///
/// Al construirlo con `build_pool` se corren las migraciones pendientes una
/// sola vez.
pub type PgPool = r2d2::Pool<ConnectionManager<PgConnection>>;
pub type PgPooledConnection = r2d2::PooledConnection<ConnectionManager<PgConnection>>;

/// Máximo de filas por INSERT de puntos (Postgres limita a 65535 binds por
/// sentencia y cada fila usa 4).
const POINT_INSERT_CHUNK: usize = 1000;

/// Proveedor abstracto de conexiones.
///
/// Permite inyectar un pool real (producción/tests de integración) o
/// simularlo en tests sin acoplar a r2d2.
pub trait ConnectionProvider: Send + Sync + 'static {
    /// Obtiene una conexión lista para ejecutar consultas Diesel.
    fn connection(&self) -> Result<PgPooledConnection, PersistenceError>;
}

/// Implementación concreta de `ConnectionProvider` respaldada por un `PgPool`.
pub struct PoolProvider {
    pub pool: PgPool,
}
impl ConnectionProvider for PoolProvider {
    fn connection(&self) -> Result<PgPooledConnection, PersistenceError> {
        self.pool.get().map_err(PersistenceError::from)
    }
}

/// Fila mapeada de la tabla `blueprints` para lecturas.
#[derive(Queryable, Debug)]
pub struct BlueprintRow {
    pub id: i64,
    pub author: String,
    pub name: String,
}

/// Fila para insertar en `blueprints`; el id lo genera la base (BIGSERIAL) y
/// se recupera vía `RETURNING`.
#[derive(Insertable, Debug)]
#[diesel(table_name = blueprints)]
pub struct NewBlueprintRow<'a> {
    pub author: &'a str,
    pub name: &'a str,
}

/// Fila para insertar en `points`.
#[derive(Insertable, Debug)]
#[diesel(table_name = points)]
pub struct NewPointRow {
    pub x: i32,
    pub y: i32,
    pub point_order: i32,
    pub blueprint_id: i64,
}

fn order_key(index: usize) -> Result<i32, PersistenceError> {
    i32::try_from(index).map_err(|_| PersistenceError::CheckViolation(format!("point_order out of range: {index}")))
}

/// Carga los puntos de varios blueprints en una sola consulta, agrupados por
/// `blueprint_id` y en orden de `point_order`.
fn load_points(conn: &mut PgConnection, ids: &[i64]) -> Result<HashMap<i64, Vec<Point>>, PersistenceError> {
    let mut grouped: HashMap<i64, Vec<Point>> = HashMap::with_capacity(ids.len());
    if ids.is_empty() {
        return Ok(grouped);
    }
    let rows: Vec<(i64, i32, i32)> = points::table.filter(points::blueprint_id.eq_any(ids))
                                                  .order((points::blueprint_id.asc(), points::point_order.asc()))
                                                  .select((points::blueprint_id, points::x, points::y))
                                                  .load(conn)?;
    for (bp_id, x, y) in rows {
        grouped.entry(bp_id).or_default().push(Point::new(x, y));
    }
    Ok(grouped)
}

/// Reconstruye los blueprints de dominio a partir de filas y puntos
/// agrupados, conservando el orden de `rows`.
fn assemble(rows: Vec<BlueprintRow>, mut grouped: HashMap<i64, Vec<Point>>) -> Result<Vec<Blueprint>, PersistenceError> {
    rows.into_iter()
        .map(|row| {
            let id = row.id;
            let pts = grouped.remove(&id).unwrap_or_default();
            Blueprint::new(row.author, row.name, pts).map_err(|e| PersistenceError::Unknown(format!("invalid blueprint row id={id}: {e}")))
        })
        .collect()
}

fn select_rows(conn: &mut PgConnection, author: Option<&str>) -> Result<Vec<BlueprintRow>, PersistenceError> {
    let base = blueprints::table.select((blueprints::id, blueprints::author, blueprints::name))
                                .order(blueprints::id.asc());
    let rows = match author {
        Some(author) => base.filter(blueprints::author.eq(author)).load(conn)?,
        None => base.load(conn)?,
    };
    Ok(rows)
}

/// Traduce el error al puerto y lo registra: `warn!` para los casos de
/// dominio, `error!` para fallas del store.
/// Postgres no admite NUL en columnas de texto; una clave así no puede
/// existir y se responde como ausente sin consultar.
fn storable(key: &str) -> bool {
    !key.contains('\0')
}

fn report(op: &str, err: PersistenceError, author: &str, name: &str) -> BlueprintError {
    let mapped = err.into_blueprint_error(author, name);
    match &mapped {
        BlueprintError::Store(msg) => error!("{op}:store error bp={author}/{name} err={msg}"),
        other => warn!("{op}: {other}"),
    }
    mapped
}

/// Implementación Postgres de `BlueprintPersistence`.
pub struct PgBlueprintPersistence<P: ConnectionProvider> {
    pub provider: P,
}

impl<P: ConnectionProvider> PgBlueprintPersistence<P> {
    /// Crea el adaptador a partir de un `ConnectionProvider` (generalmente
    /// `PoolProvider`).
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    fn insert_blueprint(&self, bp: &Blueprint) -> Result<i64, PersistenceError> {
        let mut conn = self.provider.connection()?;
        // Fila padre y puntos en la misma transacción: si falla cualquier
        // insert no queda un blueprint huérfano.
        conn.build_transaction().read_write().run::<_, PersistenceError, _>(|tx| {
            let id: i64 = diesel::insert_into(blueprints::table).values(NewBlueprintRow { author: bp.author(), name: bp.name() })
                                                                 .returning(blueprints::id)
                                                                 .get_result(tx)?;
            let rows = bp.points()
                         .iter()
                         .enumerate()
                         .map(|(i, p)| Ok(NewPointRow { x: p.x(), y: p.y(), point_order: order_key(i)?, blueprint_id: id }))
                         .collect::<Result<Vec<_>, PersistenceError>>()?;
            for chunk in rows.chunks(POINT_INSERT_CHUNK) {
                diesel::insert_into(points::table).values(chunk).execute(tx)?;
            }
            Ok::<i64, PersistenceError>(id)
        })
    }

    fn fetch_one(&self, author: &str, name: &str) -> Result<Blueprint, PersistenceError> {
        let mut conn = self.provider.connection()?;
        conn.build_transaction().read_only().repeatable_read().run::<_, PersistenceError, _>(|tx| {
            let row: BlueprintRow = blueprints::table.filter(blueprints::author.eq(author))
                                                     .filter(blueprints::name.eq(name))
                                                     .select((blueprints::id, blueprints::author, blueprints::name))
                                                     .first(tx)?;
            let grouped = load_points(tx, &[row.id])?;
            assemble(vec![row], grouped)?.pop().ok_or(PersistenceError::NotFound)
        })
    }

    fn fetch_many(&self, author: Option<&str>) -> Result<Vec<Blueprint>, PersistenceError> {
        let mut conn = self.provider.connection()?;
        conn.build_transaction().read_only().repeatable_read().run::<_, PersistenceError, _>(|tx| {
            let rows = select_rows(tx, author)?;
            let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
            let grouped = load_points(tx, &ids)?;
            assemble(rows, grouped)
        })
    }

    fn append_point(&self, author: &str, name: &str, x: i32, y: i32) -> Result<i32, PersistenceError> {
        let mut conn = self.provider.connection()?;
        conn.build_transaction().read_write().run::<_, PersistenceError, _>(|tx| {
            // Bloquea la fila padre: appends concurrentes al mismo blueprint
            // se serializan y no pueden leer el mismo máximo.
            let bp_id: i64 = blueprints::table.filter(blueprints::author.eq(author))
                                              .filter(blueprints::name.eq(name))
                                              .select(blueprints::id)
                                              .for_update()
                                              .first(tx)?;
            let current: Option<i32> = points::table.filter(points::blueprint_id.eq(bp_id))
                                                    .select(max(points::point_order))
                                                    .get_result(tx)?;
            let next = match current {
                None => 0,
                Some(m) => m.checked_add(1)
                            .ok_or_else(|| PersistenceError::CheckViolation(format!("point_order overflow for blueprint id={bp_id}")))?,
            };
            diesel::insert_into(points::table).values(NewPointRow { x, y, point_order: next, blueprint_id: bp_id })
                                              .execute(tx)?;
            Ok::<i32, PersistenceError>(next)
        })
    }

    fn remove(&self, author: &str, name: &str) -> Result<(), PersistenceError> {
        let mut conn = self.provider.connection()?;
        let deleted = diesel::delete(blueprints::table.filter(blueprints::author.eq(author))
                                                      .filter(blueprints::name.eq(name))).execute(&mut conn)?;
        if deleted == 0 {
            return Err(PersistenceError::NotFound);
        }
        Ok(())
    }
}

impl<P: ConnectionProvider> BlueprintPersistence for PgBlueprintPersistence<P> {
    fn save_blueprint(&self, bp: &Blueprint) -> Result<(), BlueprintError> {
        debug!("save_blueprint:start bp={bp} points={}", bp.len());
        let id = self.insert_blueprint(bp).map_err(|e| report("save_blueprint", e, bp.author(), bp.name()))?;
        debug!("save_blueprint:done bp={bp} id={id}");
        Ok(())
    }

    fn get_blueprint(&self, author: &str, name: &str) -> Result<Blueprint, BlueprintError> {
        debug!("get_blueprint:start bp={author}/{name}");
        if !storable(author) || !storable(name) {
            return Err(BlueprintError::not_found(author, name));
        }
        self.fetch_one(author, name).map_err(|e| report("get_blueprint", e, author, name))
    }

    fn get_blueprints_by_author(&self, author: &str) -> Result<Vec<Blueprint>, BlueprintError> {
        debug!("get_blueprints_by_author:start author={author}");
        if !storable(author) {
            return Err(BlueprintError::author_not_found(author));
        }
        let found = self.fetch_many(Some(author)).map_err(|e| report("get_blueprints_by_author", e, author, "*"))?;
        if found.is_empty() {
            warn!("get_blueprints_by_author: no blueprints for author={author}");
            return Err(BlueprintError::author_not_found(author));
        }
        debug!("get_blueprints_by_author:done author={author} count={}", found.len());
        Ok(found)
    }

    fn get_all_blueprints(&self) -> Result<Vec<Blueprint>, BlueprintError> {
        let all = self.fetch_many(None).map_err(|e| {
                                           error!("get_all_blueprints:store error err={e}");
                                           BlueprintError::from(e)
                                       })?;
        debug!("get_all_blueprints:done count={}", all.len());
        Ok(all)
    }

    fn add_point(&self, author: &str, name: &str, x: i32, y: i32) -> Result<(), BlueprintError> {
        if !storable(author) || !storable(name) {
            return Err(BlueprintError::not_found(author, name));
        }
        let order = self.append_point(author, name, x, y).map_err(|e| report("add_point", e, author, name))?;
        debug!("add_point:done bp={author}/{name} point_order={order}");
        Ok(())
    }

    fn delete_blueprint(&self, author: &str, name: &str) -> Result<(), BlueprintError> {
        if !storable(author) || !storable(name) {
            return Err(BlueprintError::not_found(author, name));
        }
        self.remove(author, name).map_err(|e| report("delete_blueprint", e, author, name))?;
        info!("delete_blueprint:done bp={author}/{name}");
        Ok(())
    }
}

/// Construye un pool Postgres r2d2 a partir de URL.
///
/// Comportamiento:
/// - Tamaños en cero se llevan a 1; si `min_size > max_size` se usa
///   `min_size = max_size`.
/// - Ejecuta las migraciones pendientes con la primera conexión.
/// - Devuelve `PersistenceError::TransientIo` ante errores del pool/manager.
pub fn build_pool(database_url: &str, min_size: u32, max_size: u32) -> Result<PgPool, PersistenceError> {
    let validated_min = min_size.max(1);
    let validated_max = max_size.max(1);
    if validated_min > validated_max {
        warn!("min_size > max_size ({} > {}), ajustando min=max", validated_min, validated_max);
    }
    let final_min = validated_min.min(validated_max);
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = r2d2::Pool::builder().min_idle(Some(final_min))
                                    .max_size(validated_max)
                                    .build(manager)
                                    .map_err(|e| PersistenceError::TransientIo(format!("pool build: {e}")))?;
    {
        let mut conn = pool.get()
                           .map_err(|e| PersistenceError::TransientIo(format!("pool get for migrations: {e}")))?;
        run_pending_migrations(&mut conn)?;
    }
    Ok(pool)
}
