use activities_client::Activity;

use crate::ids;
use crate::state::{Card, MessageSlot, PanelState};

/// Render the contents of the activity list container.
pub fn render_activity_list(state: &PanelState) -> String {
    let mut html = String::new();

    if let Some(error) = &state.load_error {
        html.push_str(&format!(
            r#"<p class="load-error">{}</p>"#,
            html_escape(error)
        ));
    }

    if state.cards.is_empty() {
        if state.loaded {
            html.push_str(r#"<p class="empty-state">No activities available. Create one above to get started.</p>"#);
        } else if state.load_error.is_none() {
            html.push_str(r#"<p class="loading">Loading activities...</p>"#);
        }
        return html;
    }

    for card in &state.cards {
        html.push_str(&render_card(card));
    }
    html
}

/// Render one activity card: header, details, participants and the edit panel.
pub fn render_card(card: &Card) -> String {
    let activity = &card.activity;
    let name = html_escape(&activity.name);

    let hidden = if card.editing { "" } else { " hidden" };
    let message = render_message(&ids::edit_message_id(&activity.name), card.message.as_ref());

    format!(
        r#"<div class="activity-card" id="{card_id}">
    <div class="activity-header">
        <h4>{name}</h4>
        <div class="activity-actions">
            <button class="edit-btn" data-activity="{name}">Edit</button>
            <button class="delete-btn" data-activity="{name}">Delete</button>
        </div>
    </div>
    {details}
    {participants}
    <div class="edit-panel{hidden}" id="{panel_id}">
        <form class="edit-form" id="{form_id}" data-activity="{name}">
            <label>Description<textarea name="description" required>{form_desc}</textarea></label>
            <label>Schedule<input type="text" name="schedule" value="{form_schedule}" required></label>
            <label>Max Participants<input type="number" name="max_participants" min="1" value="{form_max}" required></label>
            <div class="form-actions">
                <button type="submit">Save</button>
                <button type="button" class="cancel-btn" data-activity="{name}">Cancel</button>
            </div>
        </form>
        {message}
    </div>
</div>"#,
        card_id = ids::card_id(&activity.name),
        details = render_details(activity),
        participants = render_participants(activity),
        panel_id = ids::edit_panel_id(&activity.name),
        form_id = ids::edit_form_id(&activity.name),
        form_desc = html_escape(&card.form.description),
        form_schedule = html_escape(&card.form.schedule),
        form_max = html_escape(&card.form.max_participants),
    )
}

fn render_details(activity: &Activity) -> String {
    format!(
        r#"<div class="activity-details">
        <p class="description">{desc}</p>
        <p class="schedule">Schedule: {schedule}</p>
        <p class="capacity">Max Participants: {max}</p>
        <p class="enrollment">Current Enrollment: {enrolled}/{max}</p>
        <p class="spots">Spots Available: {spots}</p>
    </div>"#,
        desc = html_escape(&activity.description),
        schedule = html_escape(&activity.schedule),
        max = activity.max_participants,
        enrolled = activity.enrolled(),
        spots = activity.spots_left(),
    )
}

fn render_participants(activity: &Activity) -> String {
    if activity.participants.is_empty() {
        return r#"<div class="participants-section"><h5>Participants</h5><p class="no-participants">No participants yet</p></div>"#.to_string();
    }

    let items: String = activity
        .participants
        .iter()
        .map(|email| format!("<li>{}</li>", html_escape(email)))
        .collect::<Vec<_>>()
        .join("");
    format!(
        r#"<div class="participants-section"><h5>Participants</h5><ul class="participants-list">{items}</ul></div>"#
    )
}

fn render_message(id: &str, message: Option<&MessageSlot>) -> String {
    match message {
        Some(m) => {
            let hidden = if m.visible { "" } else { " hidden" };
            format!(
                r#"<div class="message {kind}{hidden}" id="{id}">{text}</div>"#,
                kind = m.kind.css_class(),
                text = html_escape(&m.text),
            )
        }
        None => format!(r#"<div class="message hidden" id="{id}"></div>"#),
    }
}

/// Render the full admin page: create form, its message area and the list.
pub fn render_page(state: &PanelState) -> String {
    let form = &state.create_form;
    let content = format!(
        r#"<div class="container">
    <section class="create-section">
        <h3>Create New Activity</h3>
        <form id="create-activity-form">
            <label>Activity Name<input type="text" id="activity-name" name="name" value="{name}" required></label>
            <label>Description<textarea id="activity-description" name="description" required>{desc}</textarea></label>
            <label>Schedule<input type="text" id="activity-schedule" name="schedule" value="{schedule}" required></label>
            <label>Max Participants<input type="number" id="activity-max" name="max_participants" min="1" value="{max}" required></label>
            <button type="submit">Create Activity</button>
        </form>
        {message}
    </section>
    <section class="list-section">
        <h3>Manage Activities</h3>
        <div id="activities-list">{list}</div>
    </section>
</div>"#,
        name = html_escape(&form.name),
        desc = html_escape(&form.description),
        schedule = html_escape(&form.schedule),
        max = html_escape(&form.max_participants),
        message = render_message("create-message", state.create_message.as_ref()),
        list = render_activity_list(state),
    );

    build_page("Activity Admin", &content)
}

// --- Helpers ---

fn build_page(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | Mergington High School</title>
<style>
*{{margin:0;padding:0;box-sizing:border-box;}}
body{{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;color:#1a1a1a;background:#fafafa;}}
.header{{background:#1a237e;color:#fff;padding:12px 24px;}}
.header h1{{font-size:18px;font-weight:600;}}
.container{{max-width:960px;margin:0 auto;padding:24px;}}
section{{background:#fff;border:1px solid #e0e0e0;border-radius:8px;padding:16px;margin-bottom:16px;}}
section h3{{margin-bottom:12px;}}
label{{display:block;font-size:13px;color:#555;margin-bottom:8px;}}
input,textarea{{display:block;width:100%;padding:6px;margin-top:4px;border:1px solid #ccc;border-radius:4px;font:inherit;}}
button{{padding:6px 14px;border:none;border-radius:4px;background:#1a237e;color:#fff;cursor:pointer;font-size:13px;}}
.activity-card{{border:1px solid #e0e0e0;border-radius:8px;padding:16px;margin-bottom:12px;}}
.activity-header{{display:flex;justify-content:space-between;align-items:center;margin-bottom:8px;}}
.activity-actions button{{margin-left:6px;}}
.delete-btn{{background:#c62828;}}
.activity-details p{{font-size:14px;margin-bottom:4px;}}
.participants-section{{margin-top:8px;font-size:13px;}}
.participants-list{{margin-left:20px;}}
.no-participants{{color:#888;font-style:italic;}}
.edit-panel{{margin-top:12px;padding-top:12px;border-top:1px solid #eee;}}
.form-actions{{display:flex;gap:8px;}}
.message{{margin-top:10px;padding:8px 12px;border-radius:4px;font-size:13px;}}
.message.success{{background:#e8f5e9;color:#2e7d32;}}
.message.error{{background:#fce4ec;color:#c62828;}}
.empty-state,.loading{{color:#888;text-align:center;padding:40px;}}
.load-error{{color:#c62828;text-align:center;padding:16px;}}
.hidden{{display:none;}}
</style>
</head>
<body>
<div class="header">
    <h1>Mergington High School Activity Admin</h1>
</div>
{content}
</body>
</html>"#,
        title = html_escape(title),
    )
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
