//! Textual `CREATE TABLE` synthesis from reflected metadata.
//!
//! The output is an approximation for humans and language models to read.
//! Type names are whatever the backend's type resolution produced, so the
//! statement is not guaranteed to execute on any engine.

use crate::models::ReflectedTable;

/// Builds the DDL text for `table`, named `key`.
///
/// Layout: header line with the optional `-- comment`, one indented line per
/// column with its optional `-- comment`, then a closing parenthesis. The
/// trailing run of `,` and newline characters is trimmed before the closing
/// line is appended.
pub fn synthesize_ddl(key: &str, table: &ReflectedTable) -> String {
    let mut ddl = format!(
        "CREATE TABLE {} {} \n (\n",
        key,
        comment_suffix(table.comment.as_deref())
    );

    for column in &table.columns {
        ddl.push_str(&format!(
            "  {} {} {},\n",
            column.name,
            column.type_name,
            comment_suffix(column.comment.as_deref())
        ));
    }

    let trimmed_len = ddl.trim_end_matches([',', '\n']).len();
    ddl.truncate(trimmed_len);
    ddl.push_str("\n)");
    ddl
}

fn comment_suffix(comment: Option<&str>) -> String {
    match comment {
        Some(text) if !text.is_empty() => format!("-- {}", text),
        _ => String::new(),
    }
}
