//! Planet repository for SQLite operations
//!
//! Listing goes through the criteria composer; `PlanetQuery` is the
//! executor that turns a composed plan into SQL against the pool.

use async_trait::async_trait;
use sqlx::sqlite::SqliteArguments;
use sqlx::{Arguments, SqlitePool};

use crate::data::criteria::{
    Criteria, CriteriaExecutor, CriteriaPage, QueryPlan, SqlParams, SqlValue, columns, execute,
};
use crate::data::sqlite::SqliteError;
use crate::domain::planet::{Planet, PlanetDraft, PlanetType};

const PLANETS_TABLE: &str = "planets";

/// Column order matches `PlanetTuple`
const SELECT_PLANET: &str =
    "SELECT id, name, description, distance, radius, mass, type FROM planets WHERE id = ?";

type PlanetTuple = (i64, String, String, i64, f64, f64, String);

fn planet_from_row(
    (id, name, description, distance, radius, mass, planet_type): PlanetTuple,
) -> Result<Planet, SqliteError> {
    let planet_type = planet_type
        .parse::<PlanetType>()
        .map_err(|e| SqliteError::Database(sqlx::Error::Decode(e.into())))?;
    Ok(Planet {
        id,
        name,
        description,
        distance,
        radius,
        mass,
        planet_type,
    })
}

/// Convert collected parameters into sqlx arguments, preserving order
fn bind_params<'q>(params: SqlParams) -> Result<SqliteArguments<'q>, sqlx::Error> {
    let mut args = SqliteArguments::default();
    for value in params.values {
        match value {
            SqlValue::Bool(b) => args.add(b),
            SqlValue::Int(i) => args.add(i),
            SqlValue::Float(f) => args.add(f),
            SqlValue::Text(s) => args.add(s),
        }
        .map_err(sqlx::Error::Encode)?;
    }
    Ok(args)
}

/// Base plan selecting every allow-listed planet column
pub fn base_plan() -> QueryPlan {
    QueryPlan::new(PLANETS_TABLE, columns::PLANETS.columns())
}

/// Insert a planet and return it with its assigned ID
pub async fn insert_planet(pool: &SqlitePool, draft: &PlanetDraft) -> Result<Planet, SqliteError> {
    let result = sqlx::query(
        "INSERT INTO planets (name, description, distance, radius, mass, type) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&draft.name)
    .bind(&draft.description)
    .bind(draft.distance)
    .bind(draft.radius)
    .bind(draft.mass)
    .bind(draft.planet_type.as_str())
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    tracing::debug!(id, name = %draft.name, "Planet inserted");

    Ok(draft.clone().into_planet(id))
}

/// Get a planet by ID
pub async fn get_planet(pool: &SqlitePool, id: i64) -> Result<Option<Planet>, SqliteError> {
    let row = sqlx::query_as::<_, PlanetTuple>(SELECT_PLANET)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.map(planet_from_row).transpose()
}

/// Replace a planet's fields. Returns true if the planet existed.
pub async fn update_planet(
    pool: &SqlitePool,
    id: i64,
    draft: &PlanetDraft,
) -> Result<bool, SqliteError> {
    let result = sqlx::query(
        "UPDATE planets SET name = ?, description = ?, distance = ?, radius = ?, mass = ?, type = ? WHERE id = ?",
    )
    .bind(&draft.name)
    .bind(&draft.description)
    .bind(draft.distance)
    .bind(draft.radius)
    .bind(draft.mass)
    .bind(draft.planet_type.as_str())
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete a planet by ID. Returns true if a planet was deleted.
pub async fn delete_planet(pool: &SqlitePool, id: i64) -> Result<bool, SqliteError> {
    let result = sqlx::query("DELETE FROM planets WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// List planets matching `criteria`
pub async fn list_planets(
    pool: &SqlitePool,
    criteria: &Criteria,
) -> Result<CriteriaPage<Planet>, SqliteError> {
    execute(&PlanetQuery { pool }, base_plan(), criteria, &columns::PLANETS).await
}

/// Criteria executor over the planets table
pub struct PlanetQuery<'a> {
    pub pool: &'a SqlitePool,
}

#[async_trait]
impl CriteriaExecutor for PlanetQuery<'_> {
    type Row = Planet;
    type Error = SqliteError;

    async fn fetch(&self, plan: &QueryPlan) -> Result<(Vec<Planet>, u64), SqliteError> {
        let (sql, params) = plan.select_sql();
        let rows = sqlx::query_as_with::<_, PlanetTuple, _>(&sql, bind_params(params)?)
            .fetch_all(self.pool)
            .await?;

        let (count_sql, count_params) = plan.count_sql();
        let total: i64 = sqlx::query_scalar_with(&count_sql, bind_params(count_params)?)
            .fetch_one(self.pool)
            .await?;

        let planets = rows
            .into_iter()
            .map(planet_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((planets, total as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::criteria::{CriteriaError, RawCriteria, parse_criteria};

    async fn setup_test_pool() -> SqlitePool {
        let pool = SqlitePool::connect(":memory:").await.unwrap();
        sqlx::query(crate::data::sqlite::schema::SCHEMA)
            .execute(&pool)
            .await
            .unwrap();
        pool
    }

    fn jupiter() -> PlanetDraft {
        PlanetDraft {
            name: "Jupiter".to_string(),
            description: "Largest planet".to_string(),
            distance: 20,
            radius: 9.0,
            mass: 9.0,
            planet_type: PlanetType::GasGiant,
        }
    }

    fn pluto() -> PlanetDraft {
        PlanetDraft {
            name: "Pluto".to_string(),
            description: "Dwarf planet".to_string(),
            distance: 50,
            radius: 2.0,
            mass: 2.0,
            planet_type: PlanetType::Terrestrial,
        }
    }

    /// Jupiter first, then Pluto
    async fn seeded_pool() -> SqlitePool {
        let pool = setup_test_pool().await;
        insert_planet(&pool, &jupiter()).await.unwrap();
        insert_planet(&pool, &pluto()).await.unwrap();
        pool
    }

    fn criteria(pairs: &[(&str, &str)]) -> Result<Criteria, CriteriaError> {
        parse_criteria(&RawCriteria::from_pairs(pairs.iter().copied()))
    }

    async fn names(pool: &SqlitePool, pairs: &[(&str, &str)]) -> (Vec<String>, u64) {
        let page = list_planets(pool, &criteria(pairs).unwrap()).await.unwrap();
        (page.rows.into_iter().map(|p| p.name).collect(), page.total)
    }

    #[tokio::test]
    async fn test_insert_and_get_planet() {
        let pool = setup_test_pool().await;
        let planet = insert_planet(&pool, &pluto()).await.unwrap();
        assert!(planet.id > 0);

        let fetched = get_planet(&pool, planet.id).await.unwrap().unwrap();
        assert_eq!(fetched, planet);
    }

    #[tokio::test]
    async fn test_get_planet_not_found() {
        let pool = setup_test_pool().await;
        assert!(get_planet(&pool, 42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_rejected_by_check_constraint() {
        let pool = setup_test_pool().await;
        let far = PlanetDraft {
            distance: 5000,
            ..pluto()
        };
        assert!(insert_planet(&pool, &far).await.is_err());
    }

    #[tokio::test]
    async fn test_update_planet() {
        let pool = seeded_pool().await;
        let renamed = PlanetDraft {
            name: "Pluto II".to_string(),
            ..pluto()
        };

        assert!(update_planet(&pool, 2, &renamed).await.unwrap());
        let fetched = get_planet(&pool, 2).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Pluto II");
    }

    #[tokio::test]
    async fn test_update_planet_not_found() {
        let pool = setup_test_pool().await;
        assert!(!update_planet(&pool, 9, &pluto()).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_planet() {
        let pool = seeded_pool().await;
        assert!(delete_planet(&pool, 1).await.unwrap());
        assert!(get_planet(&pool, 1).await.unwrap().is_none());
        assert!(!delete_planet(&pool, 1).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_filter_eq() {
        let pool = seeded_pool().await;
        let (names, total) = names(&pool, &[("filter[type]", r#"{"eq":"gas_giant"}"#)]).await;
        assert_eq!(names, vec!["Jupiter"]);
        assert_eq!(total, 1);
    }

    #[tokio::test]
    async fn test_list_filter_gte() {
        let pool = seeded_pool().await;
        let (names, total) = names(&pool, &[("filter[radius]", r#"{"gte":9}"#)]).await;
        assert_eq!(names, vec!["Jupiter"]);
        assert_eq!(total, 1);
    }

    #[tokio::test]
    async fn test_list_filter_in() {
        let pool = seeded_pool().await;
        let (names, total) = names(
            &pool,
            &[("filter[type]", r#"{"in":["gas_giant","terrestrial"]}"#)],
        )
        .await;
        assert_eq!(names, vec!["Jupiter", "Pluto"]);
        assert_eq!(total, 2);
    }

    #[tokio::test]
    async fn test_list_filter_notin() {
        let pool = seeded_pool().await;
        let (names, total) = names(
            &pool,
            &[("filter[type]", r#"{"notin":["gas_giant","terrestrial"]}"#)],
        )
        .await;
        assert!(names.is_empty());
        assert_eq!(total, 0);
    }

    #[tokio::test]
    async fn test_list_sort_ascending() {
        let pool = seeded_pool().await;
        let (names, _) = names(&pool, &[("sort", "radius")]).await;
        assert_eq!(names, vec!["Pluto", "Jupiter"]);
    }

    #[tokio::test]
    async fn test_list_sort_descending() {
        let pool = seeded_pool().await;
        let (names, _) = names(&pool, &[("sort", "distance desc")]).await;
        assert_eq!(names, vec!["Pluto", "Jupiter"]);
    }

    #[tokio::test]
    async fn test_list_page_window_keeps_total() {
        let pool = seeded_pool().await;
        let page = list_planets(&pool, &criteria(&[("page", "1"), ("limit", "1")]).unwrap())
            .await
            .unwrap();
        assert_eq!(page.rows.len(), 1);
        assert_eq!(page.rows[0].name, "Jupiter");
        assert_eq!(page.total, 2);
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 1);

        let (names, total) = names(&pool, &[("page", "2"), ("limit", "1")]).await;
        assert_eq!(names, vec!["Pluto"]);
        assert_eq!(total, 2);
    }

    #[test]
    fn test_list_like_with_number_fails_to_parse() {
        let err = criteria(&[("filter[type]", r#"{"like":1}"#)]).unwrap_err();
        assert_eq!(err.key(), "type");
    }

    #[tokio::test]
    async fn test_list_unlisted_field_same_as_no_filter() {
        let pool = seeded_pool().await;
        let unfiltered = names(&pool, &[]).await;
        let filtered = names(&pool, &[("filter[secret]", r#"{"eq":"x"}"#)]).await;
        assert_eq!(filtered, unfiltered);
    }

    #[tokio::test]
    async fn test_list_like_on_numeric_field_has_no_effect() {
        let pool = seeded_pool().await;
        let (names, total) = names(&pool, &[("filter[radius]", r#"{"like":"zzz"}"#)]).await;
        assert_eq!(names.len(), 2);
        assert_eq!(total, 2);
    }

    #[tokio::test]
    async fn test_list_empty_lists_have_no_effect() {
        let pool = seeded_pool().await;
        let (names, total) =
            names(&pool, &[("filter[type]", r#"{"in":[],"notin":[]}"#)]).await;
        assert_eq!(names.len(), 2);
        assert_eq!(total, 2);
    }

    #[tokio::test]
    async fn test_list_like_is_substring_and_literal() {
        let pool = seeded_pool().await;
        let (found, _) = names(&pool, &[("filter[name]", r#"{"like":"upi"}"#)]).await;
        assert_eq!(found, vec!["Jupiter"]);

        let (wildcard, _) = names(&pool, &[("filter[name]", r#"{"like":"%"}"#)]).await;
        assert!(wildcard.is_empty());
    }

    #[tokio::test]
    async fn test_list_comparison_operators() {
        let pool = seeded_pool().await;
        let cases = [
            (r#"{"eq":20}"#, vec!["Jupiter"]),
            (r#"{"neq":20}"#, vec!["Pluto"]),
            (r#"{"gt":20}"#, vec!["Pluto"]),
            (r#"{"gte":20}"#, vec!["Jupiter", "Pluto"]),
            (r#"{"lt":50}"#, vec!["Jupiter"]),
            (r#"{"lte":50}"#, vec!["Jupiter", "Pluto"]),
        ];
        for (json, expected) in cases {
            let (found, total) = names(&pool, &[("filter[distance]", json)]).await;
            assert_eq!(found, expected, "filter {json}");
            assert_eq!(total as usize, expected.len());
        }
    }

    #[tokio::test]
    async fn test_list_string_operand_on_numeric_column() {
        let pool = seeded_pool().await;
        let (found, _) = names(&pool, &[("filter[distance]", r#"{"in":["50"]}"#)]).await;
        assert_eq!(found, vec!["Pluto"]);
    }

    #[tokio::test]
    async fn test_list_or_branches() {
        let pool = seeded_pool().await;
        let (found, total) = names(
            &pool,
            &[("filter[name]", r#"{"or":[{"eq":"Pluto"},{"like":"Jup"}]}"#)],
        )
        .await;
        assert_eq!(found, vec!["Jupiter", "Pluto"]);
        assert_eq!(total, 2);
    }

    #[tokio::test]
    async fn test_list_filter_sort_paginate_together() {
        let pool = seeded_pool().await;
        insert_planet(
            &pool,
            &PlanetDraft {
                name: "Mars".to_string(),
                radius: 1.5,
                ..pluto()
            },
        )
        .await
        .unwrap();

        let (found, total) = names(
            &pool,
            &[
                ("filter[type]", r#"{"eq":"terrestrial"}"#),
                ("sort", "radius desc"),
                ("page", "2"),
                ("limit", "1"),
            ],
        )
        .await;
        assert_eq!(found, vec!["Mars"]);
        assert_eq!(total, 2);
    }

    #[tokio::test]
    async fn test_list_unlisted_sort_column_keeps_insertion_order() {
        let pool = seeded_pool().await;
        let page = list_planets(&pool, &criteria(&[("sort", "rowid desc")]).unwrap())
            .await
            .unwrap();
        let names: Vec<_> = page.rows.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Jupiter", "Pluto"]);
        assert!(!page.resolutions[0].is_applied());
    }
}
