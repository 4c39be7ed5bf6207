//! Server-rendered HTML pages.
//!
//! Every piece of user-provided text goes through [`escape`] before it is
//! written into markup. Links to a term are built with [`term_url`].

use ammonia::clean_text;
use url::Url;

use crate::api::graph::Graph;
use crate::api::search::{SearchResult, NO_DESCRIPTION};
use crate::api::term::Term;

const VIS_NETWORK_JS: &str =
    "https://unpkg.com/vis-network@9.1.9/standalone/umd/vis-network.min.js";

/// Escape text for HTML body and attribute context.
pub fn escape(text: &str) -> String {
    clean_text(text)
}

/// Absolute path `/{base}/{term}` with the term percent-encoded as one segment.
pub fn term_url(base: &str, term: &str) -> String {
    let mut url = match Url::parse("http://localhost/") {
        Ok(url) => url,
        Err(_) => return format!("/{}/{}", base, term),
    };
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.clear().push(base).push(term);
    }

    url.path().to_string()
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title} · Glossary</title>
  <script src="/static/scripts.js" defer></script>
</head>
<body>
  <nav>
    <a href="/">Home</a>
    <a href="/terms">Terms</a>
    <a href="/add">Add term</a>
    <a href="/search">Search</a>
    <a href="/add_relation">Add relation</a>
    <a href="/graph">Graph</a>
  </nav>
  <main>
    <h1>{title}</h1>
{body}
  </main>
</body>
</html>
"#,
        title = escape(title),
        body = body,
    )
}

fn description_or_placeholder(term: &Term) -> String {
    escape(term.description.as_deref().unwrap_or(NO_DESCRIPTION))
}

pub fn index() -> String {
    layout(
        "Glossary",
        r#"    <p>Browse, add and search glossary terms, and link them into a graph.</p>
    <ul>
      <li><a href="/terms">All terms</a></li>
      <li><a href="/add">Add a term</a></li>
      <li><a href="/search">Search a term</a></li>
      <li><a href="/add_relation">Relate two terms</a></li>
      <li><a href="/graph">Show the graph</a></li>
    </ul>"#,
    )
}

pub fn add() -> String {
    layout(
        "Add term",
        r#"    <form action="/glossary/" method="post" data-json-method="POST" data-redirect="/terms">
      <label>Term <input type="text" name="term" required maxlength="255"></label>
      <label>Description <textarea name="description" rows="4"></textarea></label>
      <button type="submit">Add</button>
    </form>"#,
    )
}

/// One page of the term list, with links to the neighbouring pages.
pub fn terms(terms: &[Term], offset: i64, limit: i64) -> String {
    let mut body = String::from("    <ul class=\"terms\">\n");
    for term in terms {
        body.push_str(&format!(
            "      <li><strong>{name}</strong>: {description} \
             <a href=\"{edit}\">Edit</a> \
             <button type=\"button\" data-delete-url=\"{delete}\">Delete</button></li>\n",
            name = escape(&term.term),
            description = description_or_placeholder(term),
            edit = term_url("edit", &term.term),
            delete = term_url("glossary", &term.term),
        ));
    }
    body.push_str("    </ul>\n");

    if terms.is_empty() {
        body.push_str("    <p>No terms yet.</p>\n");
    }

    body.push_str("    <p class=\"pager\">");
    if offset > 0 {
        body.push_str(&format!(
            "<a href=\"/terms?offset={}&amp;limit={}\">Previous</a> ",
            (offset - limit).max(0),
            limit
        ));
    }
    if limit > 0 && terms.len() as i64 == limit {
        body.push_str(&format!(
            "<a href=\"/terms?offset={}&amp;limit={}\">Next</a>",
            offset + limit,
            limit
        ));
    }
    body.push_str("</p>");

    layout("Terms", &body)
}

pub fn edit(term: &Term) -> String {
    let body = format!(
        r#"    <form action="{action}" method="post" data-json-method="PUT" data-redirect="/terms">
      <p>Term: <strong>{name}</strong></p>
      <label>Description <textarea name="description" rows="4" required>{description}</textarea></label>
      <button type="submit">Save</button>
    </form>"#,
        action = term_url("glossary", &term.term),
        name = escape(&term.term),
        description = escape(term.description.as_deref().unwrap_or_default()),
    );

    layout("Edit term", &body)
}

pub fn search_form() -> String {
    layout(
        "Search",
        r#"    <form action="/search" method="post">
      <label>Term <input type="text" name="term" required></label>
      <button type="submit">Search</button>
    </form>"#,
    )
}

pub fn search_results(result: &SearchResult) -> String {
    let body = match result {
        SearchResult::Found {
            term,
            description,
            edit_url,
            delete_url,
        } => format!(
            r#"    <dl>
      <dt>{term}</dt>
      <dd>{description}</dd>
    </dl>
    <a href="{edit_url}">Edit</a>
    <button type="button" data-delete-url="{delete_url}">Delete</button>"#,
            term = escape(term),
            description = escape(description),
            edit_url = edit_url,
            delete_url = delete_url,
        ),
        SearchResult::Missing { message } => format!("    <p>{}</p>", escape(message)),
    };

    layout(
        "Search results",
        &format!("{}\n    <p><a href=\"/search\">New search</a></p>", body),
    )
}

pub fn add_relation(terms: &[Term]) -> String {
    let options: String = terms
        .iter()
        .map(|t| {
            let name = escape(&t.term);
            format!("<option value=\"{}\">{}</option>", name, name)
        })
        .collect();

    let body = format!(
        r#"    <form action="/add_relation" method="post" data-json-method="POST" data-redirect="/graph">
      <label>From <select name="term_from" required>{options}</select></label>
      <label>Label <input type="text" name="label"></label>
      <label>To <select name="term_to" required>{options}</select></label>
      <button type="submit">Add relation</button>
    </form>"#,
        options = options,
    );

    layout("Add relation", &body)
}

/// Graph page. Nodes and edges are embedded as JSON and drawn by vis-network.
pub fn graph(graph: &Graph) -> Result<String, serde_json::Error> {
    // "</" would close the script element early
    let nodes = serde_json::to_string(&graph.nodes)?.replace("</", "<\\/");
    let edges = serde_json::to_string(&graph.edges)?.replace("</", "<\\/");

    let body = format!(
        r#"    <div id="graph" style="height: 600px; border: 1px solid #ccc;"></div>
    <script src="{vis}"></script>
    <script>
      const nodes = new vis.DataSet({nodes});
      const edges = new vis.DataSet({edges}.map((e) => ({{ ...e, arrows: "to" }})));
      new vis.Network(document.getElementById("graph"), {{ nodes, edges }}, {{}});
    </script>"#,
        vis = VIS_NETWORK_JS,
        nodes = nodes,
        edges = edges,
    );

    Ok(layout("Graph", &body))
}
