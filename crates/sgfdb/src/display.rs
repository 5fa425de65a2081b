//! Plain-text rendering for the terminal front end.

use sgf_core::Board;

use crate::catalog::ListResult;
use crate::detail::GameDetail;
use crate::indexer::IndexProgress;

/// Fixed-width listing of catalog records, one row per game.
pub fn render_records(result: &ListResult) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<10}  {:<20}  {:<20}  {:<8}  {}\n",
        "DATE", "WHITE", "BLACK", "RESULT", "EVENT"
    ));
    for record in &result.games {
        out.push_str(&format!(
            "{:<10}  {:<20}  {:<20}  {:<8}  {}\n",
            clip(&record.date, 10),
            clip(&record.white_player, 20),
            clip(&record.black_player, 20),
            clip(&record.result, 8),
            record.event,
        ));
    }
    if result.total > result.games.len() {
        out.push_str(&format!(
            "({} of {} games shown)\n",
            result.games.len(),
            result.total
        ));
    } else {
        out.push_str(&format!("({} games)\n", result.total));
    }
    out
}

/// Metadata view for `show`: file identity, board size, move count,
/// then every root property as stored.
pub fn render_detail(detail: &GameDetail) -> String {
    let mut out = String::new();
    out.push_str(&format!("File:  {}\n", detail.file_path));
    out.push_str(&format!("Board: {size}x{size}\n", size = detail.size));
    out.push_str(&format!("Moves: {}\n", detail.moves.len()));
    if !detail.root_props.is_empty() {
        out.push('\n');
        for (ident, values) in detail.root_props.iter() {
            out.push_str(&format!("{}: {}\n", ident, values.join(", ")));
        }
    }
    out
}

/// Replay view: the stone map with its move cursor and capture counts.
pub fn render_replay(detail: &GameDetail, board: &Board, shown: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}: move {}/{}\n\n",
        detail.file_path,
        shown,
        detail.moves.len()
    ));
    out.push_str(&board.to_string());
    out.push_str(&format!(
        "\nCaptures: black {}, white {}\n",
        board.captures_by_black, board.captures_by_white
    ));
    out
}

/// One-line summary of an indexing pass.
pub fn render_summary(progress: &IndexProgress) -> String {
    format!(
        "Indexed {} new games ({} scanned, {} skipped, {} removed)",
        progress.files_indexed,
        progress.files_scanned,
        progress.files_skipped,
        progress.files_removed
    )
}

fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        text.chars().take(width).collect()
    }
}
