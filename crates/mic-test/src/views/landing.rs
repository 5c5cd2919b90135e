use crate::views::layout::page;

/// Landing page: a single way into the test.
pub(crate) fn render() -> String {
    page(
        "Mic Test",
        r#"<main class="screen centered">
  <div class="card landing">
    <div class="badge badge-mic" aria-hidden="true">&#127908;</div>
    <h1>Mic Test</h1>
    <p class="lead">Verify your microphone works in seconds.</p>
    <p class="muted">Microphone permission + quick recording test</p>
    <a class="button button-lg" href="/mic-test">Start Mic Test</a>
  </div>
</main>"#,
        None,
    )
}
