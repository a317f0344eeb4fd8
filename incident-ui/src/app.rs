use crate::config::EndpointSources;
use crate::feed;
use crate::present::{
    DashboardView, DetailRow, DetailValue, CITATIONS_PLACEHOLDER, DETAIL_DASH, TITLE,
};
use crate::socket::BrowserSocket;
use crate::state::DashboardState;
use leptos::*;

#[component]
fn Pill(label: String) -> impl IntoView {
    view! { <span class="pill">{label}</span> }
}

#[component]
fn Section(
    title: &'static str,
    #[prop(optional, into)] right: ViewFn,
    children: Children,
) -> impl IntoView {
    view! {
      <section class="panel">
        <div class="panel-head">
          <h2>{title}</h2>
          {right.run()}
        </div>
        {children()}
      </section>
    }
}

#[component]
fn ProgressBar(width_pct: u32) -> impl IntoView {
    view! {
      <div class="bar">
        <div class="bar-fill" style=format!("width:{width_pct}%")></div>
      </div>
    }
}

#[component]
fn DetailLine(row: DetailRow) -> impl IntoView {
    let value = match row.value {
        DetailValue::Text(text) => view! { <span class="detail-text">{text}</span> }.into_view(),
        DetailValue::Pills(tags) => view! {
          <div class="pills">
            {tags.into_iter().map(|label| view! { <Pill label=label/> }).collect_view()}
          </div>
        }
        .into_view(),
        DetailValue::Dash => view! { <span>{DETAIL_DASH}</span> }.into_view(),
    };

    view! {
      <div class="detail-row">
        <span class="detail-label">{row.label}</span>
        {value}
      </div>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Held in a signal so a changed address tears down and reopens the feed.
    let endpoint = create_rw_signal(EndpointSources::from_browser().resolve());
    let state = create_rw_signal(DashboardState::default());
    let dash = create_memo(move |_| state.with(DashboardView::from_state));

    feed::bind_feed(BrowserSocket, endpoint, state);

    view! {
      <div class="page">
        <div class="left-half">
          <header class="header">
            <h1>{TITLE}</h1>
            <div class="status">
              <span class="status-dot" style=move || format!("background:{}", dash.with(|v| v.status_color))></span>
              {move || dash.with(|v| v.status_label.clone())}
            </div>
          </header>

          <div class="grid">
            <Section
              title="Incident Summary"
              right=move || view! {
                <span class="priority" style=move || dash.with(|v| v.priority_swatch.style())>
                  {move || dash.with(|v| v.priority_label.clone())}
                </span>
              }
            >
              <p class="summary">{move || dash.with(|v| v.summary.clone())}</p>
              {move || dash.with(|v| v.confidence.clone()).map(|meter| view! {
                <div class="confidence">
                  <div class="caption">"Model confidence"</div>
                  <ProgressBar width_pct=meter.width_pct/>
                  <div class="caption">{meter.label}</div>
                </div>
              })}
            </Section>

            <div class="columns">
              <Section title="Key Details">
                <div class="details">
                  {move || dash.with(|v| {
                    v.details.iter().cloned().map(|row| view! { <DetailLine row=row/> }).collect_view()
                  })}
                </div>
              </Section>

              <Section title="SOP Evidence">
                {move || dash.with(|v| {
                  if v.citations.is_empty() {
                    view! { <div class="placeholder">{CITATIONS_PLACEHOLDER}</div> }.into_view()
                  } else {
                    v.citations
                      .iter()
                      .cloned()
                      .map(|card| view! {
                        <div class="citation">
                          <div class="citation-title">{card.heading}</div>
                          <div class="citation-excerpt">{card.excerpt}</div>
                        </div>
                      })
                      .collect_view()
                  }
                })}
              </Section>

              <Section title="Rolling Transcript">
                <pre class="transcript">{move || dash.with(|v| v.transcript.clone())}</pre>
              </Section>
            </div>
          </div>
        </div>
      </div>
    }
}
