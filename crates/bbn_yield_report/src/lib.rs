//! Static HTML page presenter: the scenario as a read-only input form plus results.

use bbn_yield::compute::{
    CalcError, Evaluation, SimulatorInputs, SimulatorResults, StakingSimulator,
    EVALUATION_VERSION,
};
use bbn_yield::fingerprint::FingerprintError;
use bbn_yield::params::{InputParams, ParamsError, FIELD_SPECS};
use bbn_yield::ui::{format_pct, result_lines, SimulatorUi, PAGE_TITLE};
use bbn_yield::ReportData;
use std::fmt::Write as _;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Render a static HTML report to `out_path`. Embeds the full report JSON.
pub fn render_report(data: &ReportData, out_path: impl AsRef<Path>) -> Result<(), ReportError> {
    let html = build_html(data)?;
    let mut f = std::fs::File::create(out_path.as_ref()).map_err(ReportError::Io)?;
    f.write_all(html.as_bytes()).map_err(ReportError::Io)?;
    Ok(())
}

/// Build HTML string from report data (for testing or in-memory use).
pub fn build_html(data: &ReportData) -> Result<String, ReportError> {
    let json_embed = serde_json::to_string(&data).map_err(ReportError::Json)?;
    let eval = &data.evaluation;
    let b = &eval.breakdown;

    let mut form = String::new();
    for spec in &FIELD_SPECS {
        let max_attr = spec
            .max
            .map(|m| format!(" max=\"{}\"", m))
            .unwrap_or_default();
        let _ = writeln!(
            form,
            r#"    <label class="label" for="{name}">{label}</label><input class="mono" type="number" id="{name}" name="{name}" value="{value}" min="{min}"{max_attr} step="{step}" readonly/>"#,
            name = spec.field.name(),
            label = escape_html(spec.label),
            value = data.params.get(spec.field),
            min = spec.min,
            max_attr = max_attr,
            step = spec.step,
        );
    }

    let mut results = String::new();
    for (label, value) in result_lines(&eval.results) {
        let _ = writeln!(
            results,
            r#"    <span class="label">{}</span><span class="mono">{}</span>"#,
            label,
            format_pct(value)
        );
    }

    let html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8"/>
<meta name="viewport" content="width=device-width,initial-scale=1"/>
<title>{title}</title>
<style>
:root {{ font-family: system-ui, sans-serif; background: #0f1419; color: #e6edf3; }}
body {{ max-width: 960px; margin: 0 auto; padding: 1.5rem; display: grid; grid-template-columns: 340px 1fr; gap: 1.5rem; }}
h1 {{ font-size: 1.4rem; margin-bottom: 0.5rem; grid-column: 1 / -1; }}
h2 {{ font-size: 1.1rem; margin-top: 1.5rem; color: #8b949e; }}
.mono {{ font-family: ui-monospace, monospace; font-size: 0.9em; word-break: break-all; }}
.card {{ background: #161b22; border: 1px solid #30363d; border-radius: 6px; padding: 1rem; margin: 0.5rem 0; }}
.grid {{ display: grid; grid-template-columns: auto 1fr; gap: 0.25rem 1rem; }}
.label {{ color: #8b949e; }}
input {{ background: #0d1117; color: #e6edf3; border: 1px solid #30363d; border-radius: 4px; }}
.hash {{ font-size: 0.85em; }}
.footer {{ margin-top: 2rem; font-size: 0.85rem; color: #8b949e; }}
</style>
</head>
<body>
<h1>{title}</h1>

<aside>
<h2>Input Parameters</h2>
<form class="card grid" id="inputs">
{form}    <span class="label">BBN Split</span><span class="mono">{bbn_split}%</span>
</form>
</aside>

<main>
<p>Generated: {created}</p>

<h2>Results</h2>
<div class="card">
  <div class="grid">
{results}  </div>
</div>

<h2>Inflation reward breakdown</h2>
<div class="card">
  <div class="grid">
    <span class="label">Staked BBN (Sstaked)</span><span class="mono">{s_staked:.0}</span>
    <span class="label">Annual inflation reward, USD (Rinf)</span><span class="mono">{r_inf:.2}</span>
    <span class="label">Reward to BTC stakers, USD (RBTC)</span><span class="mono">{r_btc:.2}</span>
    <span class="label">Reward to BBN stakers, USD (RBBN)</span><span class="mono">{r_bbn:.2}</span>
    <span class="label">BTC share of TVL, USD (TBTC)</span><span class="mono">{t_btc:.2}</span>
    <span class="label">Staked BBN value, USD (VBBN)</span><span class="mono">{v_bbn:.2}</span>
  </div>
</div>

<h2>Reproducibility</h2>
<div class="card">
  <div class="mono hash">SHA-256: {hash}</div>
  <p class="footer">Re-run <code>bbn-yield simulate --json</code> with the same inputs and compare the fingerprint.</p>
</div>

<h2>Evaluation (embedded)</h2>
<div class="card">
  <script type="application/json" id="evaluation">{json_embed}</script>
</div>
</main>
</body>
</html>"#,
        title = escape_html(PAGE_TITLE),
        form = form,
        bbn_split = eval.inputs.bbn_split,
        created = escape_html(&data.created_utc_rfc3339),
        results = results,
        s_staked = b.s_staked,
        r_inf = b.r_inf,
        r_btc = b.r_btc,
        r_bbn = b.r_bbn,
        t_btc = b.t_btc,
        v_bbn = b.v_bbn,
        hash = escape_html(&data.fingerprint_sha256),
        json_embed = escape_json_in_script(&json_embed),
    );
    Ok(html)
}

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

/// `<` as `\u003c` keeps `</script>` out of the block and the JSON parseable.
fn escape_json_in_script(s: &str) -> String {
    s.replace('<', "\\u003c")
}

/// Page presenter: inputs come from `params`, the page is written on `display_results`.
pub struct HtmlUi {
    params: InputParams,
    out_path: PathBuf,
    inputs: Option<SimulatorInputs>,
}

impl HtmlUi {
    pub fn new(params: InputParams, out_path: impl Into<PathBuf>) -> Self {
        Self {
            params,
            out_path: out_path.into(),
            inputs: None,
        }
    }

    pub fn out_path(&self) -> &Path {
        &self.out_path
    }
}

impl SimulatorUi for HtmlUi {
    type Error = ReportError;

    fn setup_page(&mut self) -> Result<(), ReportError> {
        if let Some(dir) = self.out_path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(ReportError::Io)?;
        }
        Ok(())
    }

    fn get_inputs(&mut self) -> Result<SimulatorInputs, ReportError> {
        let inputs = self.params.to_inputs().map_err(ReportError::Params)?;
        self.inputs = Some(inputs.clone());
        Ok(inputs)
    }

    fn display_results(&mut self, results: &SimulatorResults) -> Result<(), ReportError> {
        let inputs = match self.inputs.take() {
            Some(i) => i,
            None => self.params.to_inputs().map_err(ReportError::Params)?,
        };
        let evaluation = Evaluation {
            version: EVALUATION_VERSION,
            breakdown: StakingSimulator::new(&inputs).breakdown(),
            inputs,
            results: results.clone(),
        };
        let data = ReportData::new(self.params.clone(), evaluation)
            .map_err(ReportError::Fingerprint)?;
        render_report(&data, &self.out_path)?;
        info!(path = %self.out_path.display(), fingerprint = %data.fingerprint_sha256, "page written");
        Ok(())
    }
}

#[derive(Debug)]
pub enum ReportError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Params(ParamsError),
    Calc(CalcError),
    Fingerprint(FingerprintError),
}

impl From<CalcError> for ReportError {
    fn from(e: CalcError) -> Self {
        ReportError::Calc(e)
    }
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportError::Io(e) => write!(f, "io: {}", e),
            ReportError::Json(e) => write!(f, "json: {}", e),
            ReportError::Params(e) => write!(f, "params: {}", e),
            ReportError::Calc(e) => write!(f, "calc: {}", e),
            ReportError::Fingerprint(e) => write!(f, "fingerprint: {}", e),
        }
    }
}

impl std::error::Error for ReportError {}
