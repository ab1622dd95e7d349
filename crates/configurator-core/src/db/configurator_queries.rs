//! Configurator definition storage and the schema loader.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension, Transaction};

use super::utils::{
    json_column, optional_json_column, timestamp_column, to_json, to_optional_json,
};
use crate::{
    error::{ConfiguratorError, DatabaseResultExt, Result},
    models::{
        ConfiguratorDefinition, ConfiguratorSchema, ConfiguratorSummary, Step, StepOption,
        StepRecord,
    },
};

const SELECT_ID_BY_SLUG_SQL: &str = "SELECT id FROM configurators WHERE slug = ?1";
const INSERT_CONFIGURATOR_SQL: &str = "INSERT INTO configurators (slug, name, description, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5)";
const UPDATE_CONFIGURATOR_SQL: &str =
    "UPDATE configurators SET name = ?1, description = ?2, updated_at = ?3 WHERE id = ?4";
const DELETE_CONFIGURATOR_STEPS_SQL: &str = "DELETE FROM configurator_steps WHERE configurator_id = ?1";
const DELETE_CONFIGURATOR_SQL: &str = "DELETE FROM configurators WHERE id = ?1";
const INSERT_STEP_SQL: &str = "INSERT INTO configurator_steps (configurator_id, step_order, field_name, input_type, is_required, title, description, min_value, max_value, step_value, validation_pattern, unit, min_selections, max_selections, measurements, visibility_condition) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)";
const INSERT_OPTION_SQL: &str = "INSERT INTO step_options (step_id, value, label, description, image_url, display_order, is_active) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";

const SELECT_CONFIGURATOR_SQL: &str =
    "SELECT id, slug, name, description FROM configurators WHERE id = ?1";
const SELECT_STEPS_SQL: &str = "SELECT id, step_order, field_name, input_type, is_required, title, description, min_value, max_value, step_value, validation_pattern, unit, min_selections, max_selections, measurements, visibility_condition FROM configurator_steps WHERE configurator_id = ?1 ORDER BY step_order, id";
const SELECT_ACTIVE_OPTIONS_SQL: &str = "SELECT value, label, description, image_url, display_order, is_active FROM step_options WHERE step_id = ?1 AND is_active = 1 ORDER BY display_order, id";
const SELECT_SUMMARIES_SQL: &str = "SELECT id, slug, name, description, step_count, submission_count, created_at, updated_at FROM configurator_summaries ORDER BY name, id";

impl super::Database {
    /// Validates and stores a definition, returning the loaded schema.
    ///
    /// A definition whose slug already exists is rejected unless `replace`
    /// is set; replacing keeps the configurator id, so earlier submissions
    /// stay linked to it.
    pub fn import_configurator(
        &mut self,
        definition: &ConfiguratorDefinition,
        replace: bool,
    ) -> Result<ConfiguratorSchema> {
        definition.validate()?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now().to_string();
        let existing: Option<i64> = tx
            .query_row(SELECT_ID_BY_SLUG_SQL, params![&definition.slug], |row| {
                row.get(0)
            })
            .optional()
            .db_context("Failed to look up configurator slug")?;

        let id = match existing {
            Some(_) if !replace => {
                return Err(ConfiguratorError::invalid_input("slug").with_reason(format!(
                    "a configurator with slug '{}' already exists",
                    definition.slug
                )))
            }
            Some(id) => {
                tx.execute(
                    UPDATE_CONFIGURATOR_SQL,
                    params![&definition.name, &definition.description, &now, id],
                )
                .db_context("Failed to update configurator")?;
                tx.execute(DELETE_CONFIGURATOR_STEPS_SQL, params![id])
                    .db_context("Failed to remove previous steps")?;
                id
            }
            None => {
                tx.execute(
                    INSERT_CONFIGURATOR_SQL,
                    params![
                        &definition.slug,
                        &definition.name,
                        &definition.description,
                        &now,
                        &now
                    ],
                )
                .db_context("Failed to insert configurator")?;
                tx.last_insert_rowid()
            }
        };

        for step in &definition.steps {
            Self::insert_step(&tx, id, step)?;
        }

        tx.commit().db_context("Failed to commit transaction")?;

        self.get_configurator(id as u64)?.ok_or_else(|| {
            ConfiguratorError::ConfiguratorNotFound {
                key: id.to_string(),
            }
        })
    }

    fn insert_step(tx: &Transaction<'_>, configurator_id: i64, step: &Step) -> Result<()> {
        let record = StepRecord::from(step);
        let measurements = if record.measurements.is_empty() {
            None
        } else {
            Some(to_json(&record.measurements)?)
        };

        tx.execute(
            INSERT_STEP_SQL,
            params![
                configurator_id,
                record.order,
                &record.field_name,
                &record.input_type,
                record.required,
                to_json(&record.title)?,
                to_optional_json(record.description.as_ref())?,
                record.min_value,
                record.max_value,
                record.step_value,
                &record.validation_pattern,
                &record.unit,
                record.min_selections,
                record.max_selections,
                measurements,
                to_optional_json(record.visibility.as_ref())?,
            ],
        )
        .db_context("Failed to insert step")?;
        let step_id = tx.last_insert_rowid();

        for option in &record.options {
            tx.execute(
                INSERT_OPTION_SQL,
                params![
                    step_id,
                    &option.value,
                    to_json(&option.label)?,
                    to_optional_json(option.description.as_ref())?,
                    &option.image_url,
                    option.display_order,
                    option.active,
                ],
            )
            .db_context("Failed to insert step option")?;
        }
        Ok(())
    }

    /// Loads a configurator with its steps in order and only its active
    /// options, sorted by display order.
    pub fn get_configurator(&self, id: u64) -> Result<Option<ConfiguratorSchema>> {
        let header = self
            .connection
            .query_row(SELECT_CONFIGURATOR_SQL, params![id as i64], |row| {
                Ok((
                    row.get::<_, i64>(0)? as u64,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, Option<String>>(3)?,
                ))
            })
            .optional()
            .db_context("Failed to query configurator")?;

        let Some((id, slug, name, description)) = header else {
            return Ok(None);
        };

        let steps = self.load_steps(id)?;
        let mut schema = ConfiguratorSchema::new(id, slug, name, steps);
        schema.description = description;
        Ok(Some(schema))
    }

    /// Loads a configurator by its slug.
    pub fn get_configurator_by_slug(&self, slug: &str) -> Result<Option<ConfiguratorSchema>> {
        let id: Option<i64> = self
            .connection
            .query_row(SELECT_ID_BY_SLUG_SQL, params![slug], |row| row.get(0))
            .optional()
            .db_context("Failed to look up configurator slug")?;

        match id {
            Some(id) => self.get_configurator(id as u64),
            None => Ok(None),
        }
    }

    fn load_steps(&self, configurator_id: u64) -> Result<Vec<Step>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_STEPS_SQL)
            .db_context("Failed to prepare query")?;

        let rows: Vec<(i64, StepRecord)> = stmt
            .query_map(params![configurator_id as i64], |row| {
                let record = StepRecord {
                    order: row.get(1)?,
                    field_name: row.get(2)?,
                    input_type: row.get(3)?,
                    required: row.get(4)?,
                    title: json_column(row, 5)?,
                    description: optional_json_column(row, 6)?,
                    min_value: row.get(7)?,
                    max_value: row.get(8)?,
                    step_value: row.get(9)?,
                    validation_pattern: row.get(10)?,
                    unit: row.get(11)?,
                    min_selections: row.get(12)?,
                    max_selections: row.get(13)?,
                    measurements: optional_json_column(row, 14)?.unwrap_or_default(),
                    visibility: optional_json_column(row, 15)?,
                    options: Vec::new(),
                };
                Ok((row.get::<_, i64>(0)?, record))
            })
            .db_context("Failed to query steps")?
            .collect::<std::result::Result<_, _>>()
            .db_context("Failed to read step row")?;

        rows.into_iter()
            .map(|(step_id, mut record)| {
                record.options = self.load_active_options(step_id)?;
                Step::try_from(record)
            })
            .collect()
    }

    fn load_active_options(&self, step_id: i64) -> Result<Vec<StepOption>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_ACTIVE_OPTIONS_SQL)
            .db_context("Failed to prepare query")?;

        let options = stmt
            .query_map(params![step_id], |row| {
                Ok(StepOption {
                    value: row.get(0)?,
                    label: json_column(row, 1)?,
                    description: optional_json_column(row, 2)?,
                    image_url: row.get(3)?,
                    display_order: row.get(4)?,
                    active: row.get(5)?,
                })
            })
            .db_context("Failed to query step options")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to read step option row")?;

        Ok(options)
    }

    /// Lists all configurators with step and submission counts.
    pub fn list_configurators(&self) -> Result<Vec<ConfiguratorSummary>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_SUMMARIES_SQL)
            .db_context("Failed to prepare query")?;

        let summaries = stmt
            .query_map([], |row| {
                Ok(ConfiguratorSummary {
                    id: row.get::<_, i64>(0)? as u64,
                    slug: row.get(1)?,
                    name: row.get(2)?,
                    description: row.get(3)?,
                    step_count: row.get::<_, i64>(4)? as u64,
                    submission_count: row.get::<_, i64>(5)? as u64,
                    created_at: timestamp_column(row, 6)?,
                    updated_at: timestamp_column(row, 7)?,
                })
            })
            .db_context("Failed to query configurators")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to read configurator row")?;

        Ok(summaries)
    }

    /// Deletes a configurator with its steps and options. Submissions are
    /// kept. Returns false when no configurator has this id.
    pub fn delete_configurator(&mut self, id: u64) -> Result<bool> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        tx.execute(DELETE_CONFIGURATOR_STEPS_SQL, params![id as i64])
            .db_context("Failed to delete configurator steps")?;
        let deleted = tx
            .execute(DELETE_CONFIGURATOR_SQL, params![id as i64])
            .db_context("Failed to delete configurator")?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(deleted > 0)
    }
}
