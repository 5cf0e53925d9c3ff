use tokio_postgres::Client;

use super::rows::{map_note_row, map_section_row, map_staff_row, map_teacher_row};
use crate::{
    models::{ClassSection, Note, Staff, Teacher},
    tally::Directory,
    utils::error::Result,
};

pub const NOTE_COLUMNS: &str = "id, giver_type, giver_name, giver_section_id, receiver_type, \
     receiver_name, receiver_section_id, receiver_teacher_id, receiver_staff_id, \
     message, weight_applied, status, created_at";

pub async fn list_sections(client: &Client) -> Result<Vec<ClassSection>> {
    let rows = client
        .query(
            "SELECT id, class_name, section_name FROM class_sections ORDER BY class_name, section_name",
            &[],
        )
        .await?;
    Ok(rows.iter().map(map_section_row).collect())
}

pub async fn list_teachers(client: &Client) -> Result<Vec<Teacher>> {
    let rows = client
        .query("SELECT id, name, subject FROM teachers ORDER BY name", &[])
        .await?;
    Ok(rows.iter().map(map_teacher_row).collect())
}

pub async fn list_staff(client: &Client) -> Result<Vec<Staff>> {
    let rows = client
        .query("SELECT id, name, role FROM staff ORDER BY name", &[])
        .await?;
    Ok(rows.iter().map(map_staff_row).collect())
}

pub async fn load_directory(client: &Client) -> Result<Directory> {
    Ok(Directory::new(
        list_sections(client).await?,
        list_teachers(client).await?,
        list_staff(client).await?,
    ))
}

/// Approved notes oldest first.
pub async fn load_approved_notes(client: &Client) -> Result<Vec<Note>> {
    let rows = client
        .query(
            &format!(
                "SELECT {NOTE_COLUMNS} FROM notes
                 WHERE status = 'approved'
                 ORDER BY created_at ASC, id ASC"
            ),
            &[],
        )
        .await?;

    rows.iter().map(map_note_row).collect()
}
