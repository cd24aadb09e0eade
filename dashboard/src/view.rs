//! Filtering, aggregate counts, and the HTML page.

use common::Job;
use html_escape::{encode_double_quoted_attribute, encode_text};
use serde::Serialize;
use std::collections::HashSet;

/// Counts shown above the job table, computed over the visible jobs only.
#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct Stats {
    pub total_jobs: usize,
    pub with_salary: usize,
    pub companies: usize,
}

impl Stats {
    pub fn from_jobs(jobs: &[Job]) -> Self {
        Self {
            total_jobs: jobs.len(),
            with_salary: jobs.iter().filter(|job| job.has_salary()).count(),
            companies: jobs
                .iter()
                .map(|job| job.company.as_str())
                .collect::<HashSet<_>>()
                .len(),
        }
    }
}

/// Keeps jobs whose title or company contains `term`, ignoring case.
/// An empty term keeps everything.
pub fn filter_jobs(jobs: Vec<Job>, term: &str) -> Vec<Job> {
    if term.is_empty() {
        return jobs;
    }

    let term = term.to_lowercase();
    jobs.into_iter()
        .filter(|job| {
            job.title.to_lowercase().contains(&term) || job.company.to_lowercase().contains(&term)
        })
        .collect()
}

pub fn render_dashboard(jobs: &[Job], stats: &Stats, search_term: &str) -> String {
    let mut html = String::with_capacity(4096 + jobs.len() * 512);

    html.push_str(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Remote Jobs Dashboard</title>
<style>
body { font-family: sans-serif; margin: 2rem; }
.stats { display: flex; gap: 2rem; margin-bottom: 1.5rem; }
.stat strong { display: block; font-size: 1.6rem; }
table { border-collapse: collapse; width: 100%; }
th, td { border-bottom: 1px solid #ddd; padding: .5rem; text-align: left; }
.tag { background: #eef; border-radius: 3px; margin-right: .25rem; padding: 0 .3rem; }
</style>
</head>
<body>
<h1>Remote Jobs Dashboard</h1>
"#,
    );

    html.push_str(&format!(
        r#"<div class="stats">
<div class="stat"><strong>{}</strong>Total jobs</div>
<div class="stat"><strong>{}</strong>With salary</div>
<div class="stat"><strong>{}</strong>Companies</div>
</div>
<form method="get" action="/">
<input type="text" name="search" placeholder="Search title or company" value="{}">
<button type="submit">Search</button>
</form>
"#,
        stats.total_jobs,
        stats.with_salary,
        stats.companies,
        encode_double_quoted_attribute(search_term),
    ));

    if !search_term.is_empty() {
        html.push_str(&format!(
            "<p>Showing results for &quot;{}&quot; (<a href=\"/\">clear</a>)</p>\n",
            encode_text(search_term)
        ));
    }

    if jobs.is_empty() {
        html.push_str("<p>No jobs found.</p>\n</body>\n</html>\n");
        return html;
    }

    html.push_str(
        "<table>\n<thead><tr><th>Title</th><th>Company</th><th>Location</th><th>Salary</th><th>Categories</th></tr></thead>\n<tbody>\n",
    );
    for job in jobs {
        let title = if job.url.is_empty() {
            encode_text(&job.title).into_owned()
        } else {
            format!(
                r#"<a href="{}" target="_blank">{}</a>"#,
                encode_double_quoted_attribute(&job.url),
                encode_text(&job.title)
            )
        };
        let tags: String = job
            .categories
            .iter()
            .map(|cat| format!(r#"<span class="tag">{}</span>"#, encode_text(cat)))
            .collect();

        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            title,
            encode_text(&job.company),
            encode_text(&job.location),
            encode_text(&job.salary),
            tags
        ));
    }
    html.push_str("</tbody>\n</table>\n</body>\n</html>\n");

    html
}
