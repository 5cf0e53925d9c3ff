use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use tokio_postgres::{Client, types::ToSql};

use common::database::{queries::NOTE_COLUMNS, rows::map_note_row};
use common::models::{Note, NoteStatus};

use super::error::{ApiError, Result};
use crate::models::note::{NewNote, Receiver};

pub fn parse_date_string(date_str: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Ok(dt.with_timezone(&Utc));
    }

    ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_str, fmt).ok())
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .ok_or_else(|| ApiError::Validation {
            field: "date".to_string(),
            message: format!(
                "Invalid date format: {}. Expected ISO 8601 or DD/MM/YYYY",
                date_str
            ),
        })
}

/// Accumulates `AND`-joined conditions with numbered placeholders.
/// `{}` in a condition is replaced by the next parameter index.
pub struct QueryBuilder {
    conditions: Vec<String>,
    params: Vec<Box<dyn ToSql + Send + Sync>>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self {
            conditions: Vec::new(),
            params: Vec::new(),
        }
    }

    pub fn bind<T: ToSql + Send + Sync + 'static>(&mut self, value: T) -> usize {
        self.params.push(Box::new(value));
        self.params.len()
    }

    pub fn add_condition<T: ToSql + Send + Sync + 'static>(&mut self, condition: &str, value: T) {
        let param_index = self.bind(value);
        self.conditions.push(condition.replace("{}", &param_index.to_string()));
    }

    pub fn add_date_condition(&mut self, field: &str, operator: &str, date_str: &str) -> Result<()> {
        let parsed = parse_date_string(date_str)?;
        self.add_condition(&format!("{} {} ${}", field, operator, "{}"), parsed);
        Ok(())
    }

    pub fn add_date_range_condition(&mut self, field: &str, from_date: Option<&str>, to_date: Option<&str>) -> Result<()> {
        if let Some(from) = from_date {
            self.add_date_condition(field, ">=", from)?;
        }
        if let Some(to) = to_date {
            self.add_date_condition(field, "<=", to)?;
        }
        Ok(())
    }

    pub fn build_where_clause(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.conditions.join(" AND "))
        }
    }

    pub fn params(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params.iter().map(|p| p.as_ref() as &(dyn ToSql + Sync)).collect()
    }
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Tables a note may reference. Kept as an enum so table names never come
/// from user input.
#[derive(Debug, Clone, Copy)]
pub enum Referenced {
    Section,
    Teacher,
    Staff,
}

impl Referenced {
    fn table(self) -> &'static str {
        match self {
            Self::Section => "class_sections",
            Self::Teacher => "teachers",
            Self::Staff => "staff",
        }
    }

    fn field(self) -> &'static str {
        match self {
            Self::Section => "section_id",
            Self::Teacher => "teacher_id",
            Self::Staff => "staff_id",
        }
    }
}

pub async fn ensure_exists(client: &Client, referenced: Referenced, id: i32) -> Result<()> {
    let row = client
        .query_one(
            &format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1)", referenced.table()),
            &[&id],
        )
        .await?;

    if row.get::<_, bool>(0) {
        Ok(())
    } else {
        Err(ApiError::validation(
            referenced.field(),
            format!("No such {} ({id})", referenced.field().trim_end_matches("_id")),
        ))
    }
}

pub async fn ensure_note_references(client: &Client, note: &NewNote) -> Result<()> {
    if let Some(section) = note.giver_section_id {
        ensure_exists(client, Referenced::Section, section).await?;
    }
    match &note.receiver {
        Receiver::Student { section_id, .. } => {
            ensure_exists(client, Referenced::Section, *section_id).await
        }
        Receiver::Teacher(id) => ensure_exists(client, Referenced::Teacher, *id).await,
        Receiver::Staff(id) => ensure_exists(client, Referenced::Staff, *id).await,
    }
}

pub async fn insert_note(client: &Client, note: &NewNote) -> Result<Note> {
    let (receiver_name, receiver_section_id, receiver_teacher_id, receiver_staff_id) =
        match &note.receiver {
            Receiver::Student { name, section_id } => (Some(name.as_str()), Some(*section_id), None, None),
            Receiver::Teacher(id) => (None, None, Some(*id), None),
            Receiver::Staff(id) => (None, None, None, Some(*id)),
        };

    let row = client
        .query_one(
            &format!(
                "INSERT INTO notes (
                    giver_type, giver_name, giver_section_id, receiver_type, receiver_name,
                    receiver_section_id, receiver_teacher_id, receiver_staff_id,
                    message, weight_applied, status
                 )
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                 RETURNING {NOTE_COLUMNS}"
            ),
            &[
                &note.giver_type.as_str(),
                &note.giver_name,
                &note.giver_section_id,
                &note.receiver.receiver_type().as_str(),
                &receiver_name,
                &receiver_section_id,
                &receiver_teacher_id,
                &receiver_staff_id,
                &note.message,
                &note.weight_applied,
                &NoteStatus::Pending.as_str(),
            ],
        )
        .await?;

    map_note_row(&row)
}

pub async fn notes_with_status(client: &Client, status: NoteStatus, limit: Option<i64>) -> Result<Vec<Note>> {
    let rows = client
        .query(
            &format!(
                "SELECT {NOTE_COLUMNS} FROM notes
                 WHERE status = $1
                 ORDER BY created_at DESC, id DESC
                 LIMIT $2"
            ),
            &[&status.as_str(), &limit],
        )
        .await?;

    rows.iter().map(map_note_row).collect()
}
