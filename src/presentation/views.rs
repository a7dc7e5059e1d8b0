// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::application::dto::transfer_request::TransferRequestDto;
use crate::domain::models::run_state::RunState;
use crate::domain::models::transfer::{RunReport, TransferOutcome};

const STYLE: &str = "body{font-family:sans-serif;max-width:48rem;margin:2rem auto;padding:0 1rem}\
label{display:block;margin-top:1rem}input[type=text]{width:100%;padding:.4rem}\
button{margin-top:1rem;padding:.5rem 1.5rem}progress{width:100%;margin-top:1rem}\
.warning{background:#fff4d6;padding:.6rem}.error{background:#fde2e2;padding:.6rem}\
.success{background:#e2f7e2;padding:.6rem}ul.items{padding-left:1.2rem}";

// Streams progress over SSE when JavaScript is available; the plain form POST is the fallback
const LIVE_SCRIPT: &str = r#"<script>
document.getElementById('run-form').addEventListener('submit', function (ev) {
  if (!window.EventSource || !window.fetch) { return; }
  ev.preventDefault();
  var form = ev.target;
  var params = new URLSearchParams(new FormData(form));
  var bar = document.getElementById('progress');
  var status = document.getElementById('status');
  var items = document.getElementById('items');
  var result = document.getElementById('result');
  bar.hidden = false; bar.value = 0; items.innerHTML = ''; result.className = ''; result.textContent = '';
  form.querySelector('button').disabled = true;
  fetch('/runs', { method: 'POST', body: params })
    .then(function (res) {
      if (!res.ok) { throw new Error('HTTP ' + res.status); }
      return res.json();
    })
    .then(function (ticket) { follow(ticket.run_id); })
    .catch(function (err) {
      form.querySelector('button').disabled = false;
      result.className = 'error';
      result.textContent = 'Error: could not start run (' + err.message + ')';
    });

  function follow(runId) {
    var source = new EventSource('/run/events?run_id=' + encodeURIComponent(runId));
    source.onmessage = function (msg) {
      var data = JSON.parse(msg.data);
      if (data.event === 'item_started') {
        status.textContent = 'Saving: ' + data.name;
      } else if (data.event === 'item_finished') {
        bar.value = data.fraction;
        var li = document.createElement('li');
        li.textContent = data.outcome.status === 'uploaded'
          ? '✔ ' + data.name
          : '✘ ' + data.name + ' (' + data.outcome.reason.stage + ' failed: ' + data.outcome.reason.message + ')';
        items.appendChild(li);
      } else if (data.event === 'finished') {
        source.close();
        form.querySelector('button').disabled = false;
        status.textContent = '';
        var state = data.report.state;
        if (state.state === 'done') {
          var ok = data.report.items.filter(function (i) { return i.outcome.status === 'uploaded'; }).length;
          var failed = data.report.items.length - ok;
          result.className = 'success';
          result.textContent = 'Done: ' + ok + ' uploaded' + (failed ? ', ' + failed + ' failed' : '');
        } else if (state.detail.kind === 'no_pdfs_found') {
          result.className = 'warning';
          result.textContent = 'No PDFs found';
        } else {
          result.className = 'error';
          result.textContent = 'Error: ' + state.detail.kind.replace(/_/g, ' ') + (state.detail.message ? ': ' + state.detail.message : '');
        }
      }
    };
    source.onerror = function () {
      source.close();
      form.querySelector('button').disabled = false;
    };
  }
});
</script>"#;

fn page(body: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>PDF Hunter</title>\
         <style>{}</style></head><body><h1>&#x1F4C2; PDF Hunter</h1>{}</body></html>",
        STYLE, body
    )
}

fn form(source_url: &str, folder_url: &str) -> String {
    format!(
        "<form id=\"run-form\" method=\"post\" action=\"/run\">\
         <label>Web page URL<input type=\"text\" name=\"source_url\" value=\"{}\" required></label>\
         <label>Drive folder URL<input type=\"text\" name=\"folder_url\" value=\"{}\" required></label>\
         <button type=\"submit\">Start</button></form>",
        encode_double_quoted_attribute(source_url),
        encode_double_quoted_attribute(folder_url)
    )
}

/// 表单页面
pub fn form_page(default_source_url: &str) -> String {
    page(&format!(
        "{}<progress id=\"progress\" max=\"1\" value=\"0\" hidden></progress>\
         <p id=\"status\"></p><ul id=\"items\" class=\"items\"></ul><p id=\"result\"></p>{}",
        form(default_source_url, ""),
        LIVE_SCRIPT
    ))
}

/// 运行结果页面
pub fn report_page(request: &TransferRequestDto, report: &RunReport) -> String {
    let mut body = form(&request.source_url, &request.folder_url);

    if !report.items.is_empty() {
        body.push_str("<progress max=\"1\" value=\"1\"></progress><ul class=\"items\">");
        for item in &report.items {
            match &item.outcome {
                TransferOutcome::Uploaded { .. } => {
                    body.push_str(&format!(
                        "<li>&#x2714; {}</li>",
                        encode_text(item.name.as_str())
                    ));
                }
                TransferOutcome::Failed { reason } => {
                    body.push_str(&format!(
                        "<li>&#x2718; {} ({})</li>",
                        encode_text(item.name.as_str()),
                        encode_text(&reason.to_string())
                    ));
                }
            }
        }
        body.push_str("</ul>");
    }

    let (class, text) = match &report.state {
        RunState::Aborted(reason) if reason.is_soft() => ("warning", "No PDFs found".to_string()),
        RunState::Aborted(reason) => ("error", format!("Error: {}", reason)),
        _ => ("success", format!("Done: {}", report.summary())),
    };
    body.push_str(&format!(
        "<p id=\"result\" class=\"{}\">{}</p>",
        class,
        encode_text(&text)
    ));

    page(&body)
}
