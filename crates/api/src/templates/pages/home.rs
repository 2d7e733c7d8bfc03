use maud::{html, Markup, PreEscaped};

use crate::templates::layouts::{base, PageConfig};

/// A documented route on the welcome page
struct RouteLink {
    path: &'static str,
    href: &'static str,
    description: &'static str,
}

const ROUTES: [RouteLink; 3] = [
    RouteLink {
        path: "/api/v1.0/precipitation",
        href: "/api/v1.0/precipitation",
        description: "for the precipitation analysis",
    },
    RouteLink {
        path: "/api/v1.0/stations",
        href: "/api/v1.0/stations",
        description: "for a list of stations",
    },
    RouteLink {
        path: "/api/v1.0/tobs",
        href: "/api/v1.0/tobs",
        description: "for the temperatures of the most-active station over its last year of data",
    },
];

pub fn home_page(api_base: &str) -> Markup {
    let config = PageConfig {
        title: "Homepage",
        api_base,
    };

    base(&config, content())
}

fn content() -> Markup {
    html! {
        h1 { "Welcome to the Simple API Hawaiian Weather Stations" }
        hr;
        h3 { "Available Routes" }
        h5 { "You can manually copy and paste into the URL box or follow the link or the button." }
        ul {
            @for route in &ROUTES {
                li {
                    mark class="code-mark" { (route.path) }
                    " " (route.description) " ("
                    a href=(route.href) { "CLICK HERE" }
                    ")"
                }
            }
            li {
                mark class="code-mark" { "/api/v1.0/<start>" }
                " or "
                mark class="code-mark" { "/api/v1.0/<start>/<end>" }
                " to get the temperature stats for a date range by replacing "
                mark class="code-mark" { "<start/end>" }
                " with the date"
                br;
                br;
                b { "Use the following input boxes to query by dates" }
                br;
                b { "Note:" }
                " The date format is "
                mark class="code-mark" { "yyyy-mm-dd" }
                br;
                form {
                    label for="start" { "Start Date" }
                    " "
                    input type="text" id="start" placeholder="yyyy-mm-dd";
                    br;
                    label for="end" { "End Date" }
                    " "
                    input type="text" id="end" placeholder="yyyy-mm-dd";
                    br;
                    input type="button" value="Submit" onclick="goToRange()";
                }
            }
        }
        script { (PreEscaped(RANGE_SCRIPT)) }
    }
}

/// Builds the range URL from the form; an empty start leads to the error route.
const RANGE_SCRIPT: &str = r#"
function goToRange() {
    const start = document.getElementById('start').value.trim();
    const end = document.getElementById('end').value.trim();
    if (start && end) {
        window.location.href = API_BASE + '/api/v1.0/' + start + '/' + end;
    } else if (start) {
        window.location.href = API_BASE + '/api/v1.0/' + start;
    } else {
        window.location.href = API_BASE + '/api/v1.0/error';
    }
}
"#;
