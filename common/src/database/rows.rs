use tokio_postgres::Row;

use crate::{
    models::{Account, ClassSection, Note, Staff, Teacher, Winner},
    utils::error::{ApiError, Result},
};

fn parse_column<T>(row: &Row, column: &str) -> Result<T>
where
    T: std::str::FromStr<Err = ApiError>,
{
    let value: String = row.get(column);
    value
        .parse()
        .map_err(|e: ApiError| ApiError::Database(format!("Corrupt {column} column: {e}")))
}

pub fn map_section_row(row: &Row) -> ClassSection {
    ClassSection {
        id: row.get("id"),
        class_name: row.get("class_name"),
        section_name: row.get("section_name"),
    }
}

pub fn map_teacher_row(row: &Row) -> Teacher {
    Teacher {
        id: row.get("id"),
        name: row.get("name"),
        subject: row.get("subject"),
    }
}

pub fn map_staff_row(row: &Row) -> Staff {
    Staff {
        id: row.get("id"),
        name: row.get("name"),
        role: row.get("role"),
    }
}

pub fn map_note_row(row: &Row) -> Result<Note> {
    Ok(Note {
        id: row.get("id"),
        giver_type: parse_column(row, "giver_type")?,
        giver_name: row.get("giver_name"),
        giver_section_id: row.get("giver_section_id"),
        receiver_type: parse_column(row, "receiver_type")?,
        receiver_name: row.get("receiver_name"),
        receiver_section_id: row.get("receiver_section_id"),
        receiver_teacher_id: row.get("receiver_teacher_id"),
        receiver_staff_id: row.get("receiver_staff_id"),
        message: row.get("message"),
        weight_applied: row.get("weight_applied"),
        status: parse_column(row, "status")?,
        created_at: row.get("created_at"),
    })
}

pub fn map_winner_row(row: &Row) -> Result<Winner> {
    Ok(Winner {
        id: row.get("id"),
        period_type: parse_column(row, "period_type")?,
        category: parse_column(row, "category")?,
        period_label: row.get("period_label"),
        rank: row.get("rank"),
        title: row.get("title"),
        description: row.get("description"),
        points: row.get("points"),
        created_at: row.get("created_at"),
    })
}

pub fn map_account_row(row: &Row) -> Result<Account> {
    Ok(Account {
        id: row.get("id"),
        role: parse_column(row, "role")?,
        name: row.get("name"),
        username: row.get("username"),
        class_section_id: row.get("class_section_id"),
        created_at: row.get("created_at"),
    })
}
