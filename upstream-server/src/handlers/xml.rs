use axum::{http::header, http::StatusCode, response::IntoResponse};

/// Slide show document served by httpbin.org/xml
pub const SAMPLE_XML: &str = r#"<?xml version='1.0' encoding='us-ascii'?>
<!--  A SAMPLE set of slides  -->
<slideshow title="Sample Slide Show" date="Date of publication" author="Yours Truly">
  <!-- TITLE SLIDE -->
  <slide type="all">
    <title>Wake up to WonderWidgets!</title>
  </slide>

  <!-- OVERVIEW -->
  <slide type="all">
    <title>Overview</title>
    <item>Why <em>WonderWidgets</em> are great</item>
    <item/>
    <item>Who <em>buys</em> WonderWidgets</item>
  </slide>
</slideshow>"#;

pub async fn xml_sample() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/xml")], SAMPLE_XML)
}

/// Accepts any SOAP envelope and answers with an empty 200
pub async fn soap_stub() -> StatusCode {
    StatusCode::OK
}
