//! Scripts evaluated in the hosted page
//!
//! Styles are tracked by element id so injecting twice replaces the rule text
//! and removing a missing style does nothing.

/// Element id of the font stylesheet
pub const FONT_STYLE_ID: &str = "chatpane-font";
/// Element id of the theme stylesheet
pub const THEME_STYLE_ID: &str = "chatpane-theme";

/// Monospace font applied to the whole page
pub const FONT_CSS: &str = include_str!("ui/fonts.css");
/// Toggleable theme
pub const THEME_CSS: &str = include_str!("ui/theme.css");

/// Quote a string as a JavaScript literal
fn js_string(s: &str) -> String {
    serde_json::Value::from(s).to_string()
}

/// Add or replace a `<style>` element
pub fn inject_style_script(id: &str, css: &str) -> String {
    format!(
        r#"(function() {{
    var id = {id};
    var el = document.getElementById(id);
    if (!el) {{
        el = document.createElement('style');
        el.id = id;
        (document.head || document.documentElement).appendChild(el);
    }}
    el.textContent = {css};
}})();"#,
        id = js_string(id),
        css = js_string(css),
    )
}

/// Remove a `<style>` element added by [`inject_style_script`]
pub fn remove_style_script(id: &str) -> String {
    format!(
        r#"(function() {{
    var el = document.getElementById({id});
    if (el) {{ el.remove(); }}
}})();"#,
        id = js_string(id),
    )
}

/// Style injection for an initialization script, which runs before the
/// document has a head
pub fn document_start_style_script(id: &str, css: &str) -> String {
    let inject = inject_style_script(id, css);
    format!(
        r#"(function() {{
    var apply = function() {{ {inject} }};
    if (document.readyState === 'loading') {{
        window.addEventListener('DOMContentLoaded', apply, {{ once: true }});
    }} else {{
        apply();
    }}
}})();"#
    )
}

/// Transient in-page notice
pub fn toast_script(title: &str, body: &str) -> String {
    format!(
        r#"(function() {{
    var host = document.body || document.documentElement;
    if (!host) {{ return; }}
    var old = document.getElementById('chatpane-toast');
    if (old) {{ old.remove(); }}
    var toast = document.createElement('div');
    toast.id = 'chatpane-toast';
    toast.setAttribute('role', 'alert');
    toast.style.cssText = 'position:fixed;left:50%;bottom:24px;transform:translateX(-50%);' +
        'max-width:480px;padding:12px 16px;border-radius:8px;z-index:2147483647;' +
        'background:#202329;color:#f1f3f5;box-shadow:0 6px 24px rgba(0,0,0,.35);' +
        'font:13px/1.4 system-ui,sans-serif;word-break:break-all;';
    var heading = document.createElement('strong');
    heading.textContent = {title};
    var text = document.createElement('div');
    text.textContent = {body};
    toast.appendChild(heading);
    toast.appendChild(text);
    host.appendChild(toast);
    setTimeout(function() {{ toast.remove(); }}, 6000);
}})();"#,
        title = js_string(title),
        body = js_string(body),
    )
}
