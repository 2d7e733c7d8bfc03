use maud::{html, Markup, PreEscaped, DOCTYPE};

pub struct PageConfig<'a> {
    pub title: &'a str,
    pub api_base: &'a str,
}

pub fn base(config: &PageConfig, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (config.title) }
                style { (PreEscaped(STYLES)) }
            }
            body data-api-base=(config.api_base.trim_end_matches('/')) {
                script { (PreEscaped(API_BASE_SCRIPT)) }

                (content)

                hr;
                p class="footer" {
                    a href="/docs" { "API Docs" }
                }
            }
        }
    }
}

const API_BASE_SCRIPT: &str = "const API_BASE = document.body.dataset.apiBase;";

const STYLES: &str = r#"
body { font-family: sans-serif; margin: 2rem; }
.code-mark { background-color: #DCDCDC; border-radius: 5px; padding: 0 4px; }
.footer { font-size: 0.8em; }
"#;
