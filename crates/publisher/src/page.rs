//! Viewer page
//!
//! Static HTML that re-requests `/image.jpg` on a timer. The `ts` query
//! parameter defeats browser caching.

/// Render the page with the given refresh period
pub fn viewer_page(refresh_interval_ms: u64) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <title>Obstacle Camera</title>
  </head>
  <body>
    <h1>Latest Capture</h1>
    <p>If no image shows up, open <a href="/image.jpg">/image.jpg</a> directly to check its status.</p>
    <img id="cam_image" src="/image.jpg" alt="latest capture" style="max-width: 100%;" />
    <script>
      function reloadImage() {{
        const img = document.getElementById('cam_image');
        img.src = '/image.jpg?ts=' + new Date().getTime();
      }}
      setInterval(reloadImage, {refresh_interval_ms});
    </script>
  </body>
</html>
"#
    )
}
