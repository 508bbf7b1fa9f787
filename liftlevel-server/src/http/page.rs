//! Server-rendered tracking page

use std::fmt::Write;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
};
use liftlevel_core::{CharacterState, Dashboard, Exercise, MAX_LEVEL, WorkoutRecord};

use crate::AppState;

/// GET /
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.tracker.dashboard(state.history_limit) {
        Ok(dashboard) => {
            Html(render_dashboard(&dashboard, state.history_limit)).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to load dashboard: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to load workout data").into_response()
        }
    }
}

/// Escape text for use inside HTML element content and quoted attributes
fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Text under the XP bar, e.g. "300 / 1000 XP to Level 2"
pub fn xp_text(character: &CharacterState) -> String {
    if character.level >= MAX_LEVEL {
        "Max level reached".to_string()
    } else {
        format!(
            "{} / {} XP to Level {}",
            character.progress.current,
            character.progress.needed,
            character.level + 1
        )
    }
}

fn render_character(out: &mut String, character: &CharacterState) {
    let level = character.level;
    let _ = write!(
        out,
        r#"<section class="character-card">
  <img id="character-image" src="/static/images/level_{level}.png" alt="Level {level} Character"
       onerror="this.onerror=null;this.src='/static/images/placeholder.svg';">
  <p class="character-label">Level {level} Evolution</p>
  <h2 class="level-number">Level {level}</h2>
  <p class="xp-total">{total} XP</p>
  <div class="xp-bar-container"><div class="xp-bar" style="width: {pct:.1}%"></div></div>
  <p class="xp-text">{text}</p>
  <button id="reset-btn" type="button" class="reset-btn">Reset Character</button>
</section>
"#,
        total = character.total_xp,
        pct = character.progress.percentage,
        text = escape_html(&xp_text(character)),
    );
}

fn render_form(out: &mut String, exercises: &[Exercise]) {
    out.push_str(
        r#"<section class="workout-card">
  <h2>Log Workout</h2>
  <form id="workout-form">
    <label for="exercise">Exercise</label>
    <select id="exercise" required>
"#,
    );
    for exercise in exercises {
        let _ = writeln!(
            out,
            r#"      <option value="{}">{}</option>"#,
            exercise.id,
            escape_html(&exercise.label())
        );
    }
    out.push_str(
        r#"    </select>
    <label for="weight">Weight (lbs)</label>
    <input id="weight" type="number" min="0" step="0.5" required>
    <label for="reps">Reps</label>
    <input id="reps" type="number" min="0" step="1" required>
    <label for="sets">Sets</label>
    <input id="sets" type="number" min="0" step="1" required>
    <button type="submit">Log Workout</button>
  </form>
  <div id="workout-result" class="workout-result" style="display: none"></div>
</section>
"#,
    );
}

fn render_history(out: &mut String, history: &[WorkoutRecord]) {
    out.push_str(
        r#"<section class="history-card">
  <h2>Recent Workouts</h2>
  <div id="workout-history">
"#,
    );
    if history.is_empty() {
        out.push_str(
            r#"    <p class="no-history">No workouts logged yet. Start your journey!</p>
"#,
        );
    }
    for record in history {
        let _ = write!(
            out,
            r#"    <div class="workout-entry">
      <div class="workout-header">
        <span class="workout-exercise">{name}</span>
        <span class="workout-xp">+{xp} XP</span>
      </div>
      <div class="workout-details">{weight} lbs &times; {reps} reps &times; {sets} sets</div>
      <div class="workout-date">{date}</div>
    </div>
"#,
            name = escape_html(&record.exercise_name),
            xp = record.xp_earned,
            weight = record.weight,
            reps = record.reps,
            sets = record.sets,
            date = record.timestamp.format("%Y-%m-%d"),
        );
    }
    out.push_str("  </div>\n</section>\n");
}

/// Render the full tracking page; `history_limit` caps the client-side list too
pub fn render_dashboard(dashboard: &Dashboard, history_limit: u32) -> String {
    let mut out = String::with_capacity(8 * 1024);
    out.push_str(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>LiftLevel</title>
  <link rel="stylesheet" href="/static/css/style.css">
</head>
<body>
<header><h1>LiftLevel</h1><p>Lift weights, earn XP, level up.</p></header>
<main>
"#,
    );
    render_character(&mut out, &dashboard.character);
    render_form(&mut out, &dashboard.exercises);
    render_history(&mut out, &dashboard.history);
    let _ = write!(
        out,
        r#"</main>
<div id="level-up-modal" class="modal" style="display: none">
  <div class="modal-content">
    <span class="close">&times;</span>
    <h2>Level Up!</h2>
    <p>You reached Level <span id="new-level"></span>!</p>
  </div>
</div>
<script>window.LIFTLEVEL_MAX_LEVEL = {MAX_LEVEL}; window.LIFTLEVEL_HISTORY_SIZE = {history_limit};</script>
<script src="/static/js/script.js"></script>
</body>
</html>
"#
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use liftlevel_core::progression;

    fn character(total_xp: i64) -> CharacterState {
        let level = progression::level_for_xp(total_xp);
        CharacterState {
            total_xp,
            level,
            progress: progression::progress(total_xp, level),
        }
    }

    fn dashboard(history: Vec<WorkoutRecord>) -> Dashboard {
        Dashboard {
            character: character(1300),
            exercises: vec![
                Exercise {
                    id: 1,
                    name: "Bench Press".into(),
                    category: "Chest".into(),
                },
                Exercise {
                    id: 2,
                    name: "Squat".into(),
                    category: "Legs".into(),
                },
            ],
            history,
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Rows" & 'Dips'</b>"#),
            "&lt;b&gt;&quot;Rows&quot; &amp; &#39;Dips&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_xp_text() {
        assert_eq!(xp_text(&character(300)), "300 / 1000 XP to Level 2");
        assert_eq!(xp_text(&character(60_000)), "Max level reached");
    }

    #[test]
    fn test_render_shows_character() {
        let html = render_dashboard(&dashboard(vec![]), 10);
        assert!(html.contains(r#"<h2 class="level-number">Level 2</h2>"#));
        assert!(html.contains("1300 XP"));
        assert!(html.contains("/static/images/level_2.png"));
        assert!(html.contains("300 / 2482 XP to Level 3"));
    }

    #[test]
    fn test_render_lists_exercises() {
        let html = render_dashboard(&dashboard(vec![]), 10);
        assert!(html.contains(r#"<option value="1">Bench Press (Chest)</option>"#));
        assert!(html.contains(r#"<option value="2">Squat (Legs)</option>"#));
    }

    #[test]
    fn test_render_exposes_page_limits() {
        let html = render_dashboard(&dashboard(vec![]), 25);
        assert!(html.contains("window.LIFTLEVEL_MAX_LEVEL = 10;"));
        assert!(html.contains("window.LIFTLEVEL_HISTORY_SIZE = 25;"));
    }

    #[test]
    fn test_render_empty_history_placeholder() {
        let html = render_dashboard(&dashboard(vec![]), 10);
        assert!(html.contains("No workouts logged yet"));
    }

    #[test]
    fn test_render_history_entries() {
        let record = WorkoutRecord {
            id: 1,
            exercise_id: None,
            exercise_name: "<script>".into(),
            weight: 135.5,
            reps: 5,
            sets: 3,
            xp_earned: 203,
            timestamp: Utc.with_ymd_and_hms(2026, 10, 16, 8, 30, 0).unwrap(),
        };
        let html = render_dashboard(&dashboard(vec![record]), 10);

        assert!(!html.contains("No workouts logged yet"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("+203 XP"));
        assert!(html.contains("135.5 lbs &times; 5 reps &times; 3 sets"));
        assert!(html.contains("2026-10-16"));
    }
}
