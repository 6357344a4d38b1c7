//! Handlebars templates for the dashboard fragments. `{{...}}` output is
//! HTML-escaped by the engine.

use anyhow::Result;
use handlebars::Handlebars;
use serde::Serialize;
use serde_json::json;

use super::session::SessionId;
use super::view::{ListState, PulseState};

pub const EMPTY_MESSAGE: &str =
    "No private repositories found. Make sure your GitHub token has access to private repositories.";
pub const LIST_ERROR_MESSAGE: &str =
    "Error loading repositories. Please check your GitHub token configuration.";
pub const LOADING_REPOSITORIES: &str = "Loading repositories...";
pub const LOADING_PULSE: &str = "Loading pulse data...";

const LOADING: &str = "loading";
const MESSAGE: &str = "message";
const REPOSITORY_LIST: &str = "repository_list";
const PULSE: &str = "pulse";

const LOADING_TEMPLATE: &str =
    r#"<div class="loading"><i class="fas fa-spinner fa-spin"></i> {{text}}</div>"#;

const MESSAGE_TEMPLATE: &str =
    r#"<div class="error-message"><i class="fas {{icon}}"></i> {{text}}</div>"#;

const REPOSITORY_LIST_TEMPLATE: &str = r#"<div class="repository-rows" data-session="{{session}}">
{{#each rows}}
<div class="repository-item{{#if selected}} selected{{/if}}" data-index="{{@index}}" data-owner="{{owner}}" data-repo="{{name}}">
  <div class="repository-name"><i class="fas fa-lock"></i> {{full_name}}</div>
  <div class="repository-description">{{description}}</div>
  <div class="repository-meta">
    <span><i class="fas fa-code-branch"></i> {{default_branch}}</span>
    <span><i class="fas fa-star"></i> {{stars}}</span>
    <span><i class="fas fa-code-fork"></i> {{forks}}</span>
    <span><i class="fas fa-clock"></i> Updated {{updated}}</span>
  </div>
</div>
{{/each}}
</div>
"#;

const PULSE_TEMPLATE: &str = r#"<div class="pulse-stats">
{{#each stats}}
  <div class="stat-card {{kind}}"><div class="stat-value">{{value}}</div><div class="stat-label">{{label}}</div></div>
{{/each}}
</div>
<div class="pulse-details">
<div class="pulse-section-item">
  <h3><i class="fas fa-code-commit"></i> Recent Commits</h3>
{{#each commits}}
  <div class="commit-item"><div class="commit-message">{{headline}}</div><div class="commit-author">by {{author}} &bull; {{when}}</div></div>
{{/each}}
</div>
<div class="pulse-section-item">
  <h3><i class="fas fa-code-pull-request"></i> Pull Requests</h3>
{{#each pull_requests}}
  <div class="pr-item"><div class="pr-title">{{headline}}</div><div class="pr-author">by {{author}} &bull; {{state}} &bull; {{when}}</div></div>
{{/each}}
</div>
<div class="pulse-section-item">
  <h3><i class="fas fa-exclamation-circle"></i> Issues</h3>
{{#each issues}}
  <div class="issue-item"><div class="issue-title">{{headline}}</div><div class="issue-author">by {{author}} &bull; {{state}} &bull; {{when}}</div></div>
{{/each}}
</div>
<div class="pulse-section-item">
  <h3><i class="fas fa-users"></i> Top Contributors</h3>
{{#each contributors}}
  <div class="contributor-item"><img src="{{avatar_url}}" alt="{{login}}" class="contributor-avatar"><div class="contributor-info"><div class="contributor-name">{{login}}</div><div class="contributor-contributions">{{contributions}} contributions</div></div></div>
{{/each}}
</div>
</div>
"#;

/// Compiled fragment templates, built once at startup.
pub struct Templates {
    handlebars: Handlebars<'static>,
}

impl Templates {
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.register_template_string(LOADING, LOADING_TEMPLATE)?;
        handlebars.register_template_string(MESSAGE, MESSAGE_TEMPLATE)?;
        handlebars.register_template_string(REPOSITORY_LIST, REPOSITORY_LIST_TEMPLATE)?;
        handlebars.register_template_string(PULSE, PULSE_TEMPLATE)?;

        Ok(Self { handlebars })
    }

    pub fn repository_list(&self, session: SessionId, state: &ListState) -> Result<String> {
        match state {
            ListState::Loading => self.render(LOADING, &json!({ "text": LOADING_REPOSITORIES })),
            ListState::Empty => self.message("fa-info-circle", EMPTY_MESSAGE),
            ListState::Failed => self.message("fa-exclamation-triangle", LIST_ERROR_MESSAGE),
            ListState::Rows(rows) => {
                self.render(REPOSITORY_LIST, &json!({ "session": session, "rows": rows }))
            }
        }
    }

    pub fn pulse_panel(&self, state: &PulseState) -> Result<String> {
        match state {
            PulseState::Loading(_) => self.render(LOADING, &json!({ "text": LOADING_PULSE })),
            PulseState::Failed(selection) => self.message(
                "fa-exclamation-triangle",
                &format!("Error loading pulse data for {}", selection),
            ),
            PulseState::Ready(_, view) => self.render(PULSE, view),
        }
    }

    fn message(&self, icon: &str, text: &str) -> Result<String> {
        self.render(MESSAGE, &json!({ "icon": icon, "text": text }))
    }

    fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        Ok(self.handlebars.render(name, data)?)
    }
}
