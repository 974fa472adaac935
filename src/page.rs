//! The browser page served at `/`.
//!
//! The page is static. Its script calls the trigger endpoints and swaps each
//! panel's contents with the returned fragment. While a request is in flight
//! both buttons are disabled, and every request carries a `seq` token so a
//! response that is no longer the latest is dropped.

use crate::report::Panel;

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Country Stats</title>
<style>
body { font-family: sans-serif; margin: 2rem; }
table { border-collapse: collapse; margin-bottom: 1.5rem; }
td, th { border: 1px solid #ccc; padding: 0.25rem 0.75rem; }
th { background: #f0f0f0; text-align: left; }
</style>
</head>
<body>
<h1>Country Stats</h1>
<input id="countryInput" type="text" placeholder="Country name">
<button id="searchButton">Search</button>
<button id="allButton">Show All</button>
"#;

const PAGE_SCRIPT: &str = r#"<script>
"use strict";
let latestSeq = 0;
const buttons = [document.getElementById("searchButton"), document.getElementById("allButton")];

function setBusy(busy) {
    buttons.forEach(b => { b.disabled = busy; });
}

function applyPanels(panels) {
    for (const [panel, id] of Object.entries(PANEL_IDS)) {
        const el = document.getElementById(id);
        const target = el.tagName === "TABLE" ? el.querySelector("tbody") : el;
        target.innerHTML = panels[panel] || "";
    }
}

async function trigger(path) {
    const seq = ++latestSeq;
    setBusy(true);
    try {
        const sep = path.includes("?") ? "&" : "?";
        const response = await fetch(`${path}${sep}seq=${seq}`);
        const body = await response.json();
        if (body.seq !== latestSeq) return;
        applyPanels(body.panels);
        if (body.error) alert(body.error);
    } catch (e) {
        if (seq === latestSeq) alert("Failed to fetch countries");
    } finally {
        if (seq === latestSeq) setBusy(false);
    }
}

document.getElementById("searchButton").addEventListener("click", () => {
    const name = document.getElementById("countryInput").value.trim();
    if (!name) return alert("Please enter a country name");
    trigger(`/countries/search?name=${encodeURIComponent(name)}`);
});

document.getElementById("allButton").addEventListener("click", () => trigger("/countries"));
</script>
</body>
</html>
"#;

/// Render the complete page.
pub fn index_html() -> String {
    let mut html = String::from(PAGE_HEAD);

    for panel in Panel::ALL {
        html.push_str(&panel_markup(panel));
    }

    let ids = Panel::ALL
        .iter()
        .map(|p| format!("\"{}\": \"{}\"", panel_key(*p), p.element_id()))
        .collect::<Vec<_>>()
        .join(", ");
    html.push_str(&format!("<script>const PANEL_IDS = {{{}}};</script>\n", ids));
    html.push_str(PAGE_SCRIPT);
    html
}

fn panel_markup(panel: Panel) -> String {
    let (title, headers) = match panel {
        Panel::Results => ("Results", ("Country", "Population")),
        Panel::Population => ("Population", ("Country", "Population")),
        Panel::Regions => ("Regions", ("Region", "Countries")),
        Panel::Languages => ("Languages", ("Language", "Countries")),
        Panel::Currencies => ("Currencies", ("Currency", "Countries")),
        Panel::Stats => {
            return format!(
                "<h2>Statistics</h2>\n<div id=\"{}\"></div>\n",
                panel.element_id()
            );
        }
    };

    format!(
        "<h2>{}</h2>\n<table id=\"{}\"><thead><tr><th>{}</th><th>{}</th></tr></thead><tbody></tbody></table>\n",
        title,
        panel.element_id(),
        headers.0,
        headers.1
    )
}

/// Key of the panel in the JSON panel set.
fn panel_key(panel: Panel) -> &'static str {
    match panel {
        Panel::Results => "results",
        Panel::Population => "population",
        Panel::Regions => "regions",
        Panel::Languages => "languages",
        Panel::Currencies => "currencies",
        Panel::Stats => "stats",
    }
}
