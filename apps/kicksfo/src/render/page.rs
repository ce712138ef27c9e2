//! Dashboard page.
//!
//! Layout: header, sidebar (upload, reset, athlete selection), then the main
//! column with the data notice or preview, the radar chart, the profile
//! summary and the per-athlete score table.

use super::{escape, radar_svg};
use crate::config::DashboardConfig;
use kicksfo_core::{Analysis, DataSource, KickError, MatchEvent, primitives::REQUIRED_COLUMNS};

const SAMPLE_NOTICE: &str =
    "📌 현재 샘플 데이터로 시연 중입니다. 좌측에서 CSV를 업로드하면 실제 데이터로 전환됩니다.";
const FOOTER: &str =
    "© 2025 KickSFO. All rights reserved. · Research & Performance Analytics Platform";

const STYLE: &str = "\
body{margin:0;background:#0e1117;color:#fafafa;font-family:sans-serif}\
header{display:flex;gap:24px;align-items:center;padding:16px 32px}\
header .brand{font-size:22px;font-weight:bold}\
header h1{margin:0;font-size:28px}\
header p{margin:4px 0 0;color:#a3a8b8}\
.layout{display:flex}\
aside{width:280px;padding:16px 24px;background:#262730;min-height:100vh}\
main{flex:1;padding:16px 32px}\
table{border-collapse:collapse;margin:8px 0 24px}\
th,td{border:1px solid #3a3b45;padding:4px 10px;text-align:left}\
.notice{padding:10px 14px;border-radius:6px;margin:8px 0}\
.info{background:#1c3a5e}.warn{background:#5e4b1c}.error{background:#5e1c1c}\
select{width:100%;min-height:120px}";

/// A banner shown above the main content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Warning(String),
    Error(String),
}

impl Notice {
    fn render(&self) -> String {
        let (class, text) = match self {
            Self::Info(t) => ("info", t),
            Self::Warning(t) => ("warn", t),
            Self::Error(t) => ("error", t),
        };
        format!("<div class=\"notice {class}\">{}</div>\n", escape(text))
    }
}

/// Everything one dashboard render needs.
pub struct DashboardView<'a> {
    pub config: &'a DashboardConfig,
    pub analysis: &'a Analysis,
    /// Athletes to chart, in display order. May be empty.
    pub selected: &'a [String],
    pub notices: Vec<Notice>,
}

/// Render the full dashboard.
///
/// # Errors
///
/// `KickError::UnknownAthlete` if the selection names an athlete that is not
/// in the loaded data.
pub fn dashboard(view: &DashboardView<'_>) -> Result<String, KickError> {
    let config = view.config;
    let analysis = view.analysis;
    let taxonomy = &config.taxonomy;

    // Build the fallible parts first so nothing is half-rendered.
    let chart = analysis
        .radar(taxonomy, view.selected)?
        .with_title(config.chart_title.clone());
    let score_rows = analysis.score_rows(taxonomy, view.selected)?;

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"ko\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!(
        "<title>{} | {}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n",
        escape(&config.brand),
        escape(&config.title)
    ));

    // Header
    html.push_str(&format!(
        "<header><div class=\"brand\">🥋 {}</div><div><h1>{}</h1><p>{}</p></div></header>\n<hr>\n",
        escape(&config.brand),
        escape(&config.title),
        escape(&config.caption)
    ));

    html.push_str("<div class=\"layout\">\n");
    html.push_str(&sidebar(analysis, view.selected));

    // Main column
    html.push_str("<main>\n");
    for notice in &view.notices {
        html.push_str(&notice.render());
    }

    match analysis.source() {
        DataSource::Sample => html.push_str(&Notice::Info(SAMPLE_NOTICE.to_string()).render()),
        DataSource::Upload { name } => {
            html.push_str(&format!("<h2>데이터 미리보기</h2>\n<p>{}</p>\n", escape(name)));
            html.push_str(&preview_table(analysis.preview()));
        }
    }

    if !analysis.unrecognized().is_empty() {
        let axes: Vec<&str> = analysis.unrecognized().iter().map(|a| a.as_str()).collect();
        html.push_str(
            &Notice::Warning(format!(
                "분류에 없는 기술 조합은 차트와 점수표에서 제외됩니다: {}",
                axes.join(", ")
            ))
            .render(),
        );
    }

    if !view.selected.is_empty() {
        html.push_str("<section id=\"radar\">\n");
        html.push_str(&radar_svg(&chart));
        html.push_str("</section>\n");

        html.push_str("<h2>선수 프로파일 요약</h2>\n<table id=\"profiles\">\n");
        html.push_str(
            "<tr><th>athlete</th><th>style</th><th>signature</th><th>career</th></tr>\n",
        );
        for row in analysis.profiles() {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                escape(&row.athlete),
                escape(&row.style),
                escape(&row.signature),
                escape(&row.career)
            ));
        }
        html.push_str("</table>\n");

        html.push_str("<h2>선수별 기술 점수</h2>\n<table id=\"scores\">\n<tr><th>선수</th>");
        for axis in &chart.axes {
            html.push_str(&format!("<th>{}</th>", escape(axis.as_str())));
        }
        html.push_str("</tr>\n");
        for row in &score_rows {
            html.push_str(&format!("<tr><td>{}</td>", escape(&row.athlete)));
            for score in &row.scores {
                html.push_str(&format!("<td>{score}</td>"));
            }
            html.push_str("</tr>\n");
        }
        html.push_str("</table>\n");
    }

    html.push_str("</main>\n</div>\n<hr>\n");
    html.push_str(&format!("<footer><small>{FOOTER}</small></footer>\n</body>\n</html>\n"));
    Ok(html)
}

/// Minimal page for failures that prevent the dashboard itself rendering.
pub fn error_page(config: &DashboardConfig, error: &KickError) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"ko\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{} | Error</title>\n<style>{STYLE}</style>\n</head>\n<body>\n<main>\n\
         {}<p><a href=\"/\">← 대시보드로 돌아가기</a></p>\n</main>\n</body>\n</html>\n",
        escape(&config.brand),
        Notice::Error(error.to_string()).render()
    )
}

fn sidebar(analysis: &Analysis, selected: &[String]) -> String {
    let mut html = String::from("<aside>\n");

    html.push_str(
        "<form action=\"/upload\" method=\"post\" enctype=\"multipart/form-data\">\n\
         <label for=\"file\">태권도 경기 데이터 CSV 업로드</label><br>\n\
         <input type=\"file\" id=\"file\" name=\"file\" accept=\".csv\" required>\n\
         <button type=\"submit\">업로드</button>\n</form>\n",
    );
    if !analysis.is_sample() {
        html.push_str(
            "<form action=\"/reset\" method=\"post\">\
             <button type=\"submit\">샘플 데이터로 돌아가기</button></form>\n",
        );
    }

    html.push_str(
        "<form action=\"/\" method=\"get\">\n\
         <label for=\"athlete\">비교할 선수 선택</label><br>\n\
         <input type=\"hidden\" name=\"submitted\" value=\"1\">\n\
         <select id=\"athlete\" name=\"athlete\" multiple>\n",
    );
    for athlete in analysis.athletes() {
        let mark = if selected.contains(&athlete) {
            " selected"
        } else {
            ""
        };
        html.push_str(&format!(
            "<option value=\"{0}\"{mark}>{0}</option>\n",
            escape(&athlete)
        ));
    }
    html.push_str("</select>\n<button type=\"submit\">적용</button>\n</form>\n</aside>\n");
    html
}

fn preview_table(events: &[MatchEvent]) -> String {
    let mut html = String::from("<table id=\"preview\">\n<tr>");
    for column in REQUIRED_COLUMNS {
        html.push_str(&format!("<th>{column}</th>"));
    }
    html.push_str("</tr>\n");
    for event in events {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape(&event.athlete),
            escape(&event.target),
            escape(&event.foot),
            escape(&event.technique),
            event.success_flag(),
            escape(&event.style),
            escape(&event.signature),
            escape(&event.career)
        ));
    }
    html.push_str("</table>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(analysis: &Analysis, selected: &[String]) -> Result<String, KickError> {
        let config = DashboardConfig::default();
        dashboard(&DashboardView {
            config: &config,
            analysis,
            selected,
            notices: Vec::new(),
        })
    }

    #[test]
    fn sample_dashboard_shows_notice_chart_and_tables() {
        let analysis = Analysis::sample(&DashboardConfig::default().taxonomy);
        let html = render(&analysis, &analysis.athletes()).expect("page");
        assert!(html.contains(SAMPLE_NOTICE));
        assert!(html.contains("<svg"));
        assert!(html.contains("id=\"profiles\""));
        assert!(html.contains("id=\"scores\""));
        assert!(!html.contains("id=\"preview\""));
    }

    #[test]
    fn empty_selection_renders_no_chart() {
        let analysis = Analysis::sample(&DashboardConfig::default().taxonomy);
        let html = render(&analysis, &[]).expect("page");
        assert!(!html.contains("<svg"));
        assert!(!html.contains("id=\"scores\""));
        assert!(html.contains("<select"));
    }

    #[test]
    fn unknown_selection_is_an_error() {
        let analysis = Analysis::sample(&DashboardConfig::default().taxonomy);
        let result = render(&analysis, &["없는선수".to_string()]);
        assert!(matches!(result, Err(KickError::UnknownAthlete(_))));
    }

    #[test]
    fn upload_shows_preview() {
        let csv = "athlete,target,foot,technique,success,style,signature,career\n\
                   A,얼굴,앞발,빠른발,1,s,g,c\n";
        let analysis = Analysis::from_csv(
            "mine.csv",
            csv.as_bytes(),
            &DashboardConfig::default().taxonomy,
        )
        .expect("valid");
        let html = render(&analysis, &analysis.athletes()).expect("page");
        assert!(html.contains("id=\"preview\""));
        assert!(html.contains("mine.csv"));
        assert!(!html.contains(SAMPLE_NOTICE));
    }

    #[test]
    fn error_page_escapes_message() {
        let page = error_page(
            &DashboardConfig::default(),
            &KickError::UnknownAthlete("<x>".to_string()),
        );
        assert!(page.contains("Unknown athlete: &lt;x&gt;"));
    }
}
