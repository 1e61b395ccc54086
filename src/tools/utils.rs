use url::{Host, Url};

/// Complete a URL typed by a user or agent.
///
/// Input that already parses with a scheme (`https:`, `data:`, `about:`, ...) and relative
/// paths are only trimmed. Loopback and private IPv4 hosts get `http://`, other hosts get
/// `https://`, and a single word such as `github` is read as `www.github.com`.
pub fn normalize_url(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.starts_with(['/', '.']) || has_scheme(trimmed) {
        return trimmed.to_string();
    }

    let Ok(candidate) = Url::parse(&format!("http://{trimmed}")) else {
        return format!("https://{trimmed}");
    };
    match candidate.host() {
        Some(Host::Domain("localhost")) => format!("http://{trimmed}"),
        Some(Host::Ipv4(ip)) if ip.is_loopback() || ip.is_private() => format!("http://{trimmed}"),
        Some(Host::Domain(name)) if !name.contains('.') && candidate.port().is_none() => {
            let rest = trimmed.find(['/', '?', '#']).map_or("", |i| &trimmed[i..]);
            format!("https://www.{name}.com{rest}")
        }
        _ => format!("https://{trimmed}"),
    }
}

/// `localhost:3000` parses as scheme `localhost`; a numeric first segment means host and port.
fn has_scheme(input: &str) -> bool {
    let Ok(parsed) = Url::parse(input) else {
        return false;
    };
    let rest = &input[parsed.scheme().len() + 1..];
    let first = rest.split(['/', '?', '#']).next().unwrap_or_default();
    first.is_empty() || !first.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schemed_input_passes_through() {
        for url in ["https://ex.com/a", "HTTP://ex.com", "about:blank", "file:///tmp/x.html", "chrome://settings", "mailto:a@ex.com"] {
            assert_eq!(normalize_url(url), url);
        }
        assert_eq!(normalize_url("data:text/html,<p>x</p>"), "data:text/html,<p>x</p>");
    }

    #[test]
    fn test_domains_gain_https() {
        assert_eq!(normalize_url("ex.com/shop"), "https://ex.com/shop");
        assert_eq!(normalize_url("  cdn.ex.com  "), "https://cdn.ex.com");
        assert_eq!(normalize_url("ex.com:8443/x"), "https://ex.com:8443/x");
        assert_eq!(normalize_url("8.8.8.8"), "https://8.8.8.8");
    }

    #[test]
    fn test_single_word_is_a_www_domain() {
        assert_eq!(normalize_url("github"), "https://www.github.com");
        assert_eq!(normalize_url("github/rust-lang"), "https://www.github.com/rust-lang");
    }

    #[test]
    fn test_local_hosts_use_http() {
        assert_eq!(normalize_url("localhost:3000"), "http://localhost:3000");
        assert_eq!(normalize_url("localhost"), "http://localhost");
        assert_eq!(normalize_url("127.0.0.1"), "http://127.0.0.1");
        assert_eq!(normalize_url("192.168.1.20:8080/admin"), "http://192.168.1.20:8080/admin");
    }

    #[test]
    fn test_relative_paths_unchanged() {
        assert_eq!(normalize_url("/shop/index.html"), "/shop/index.html");
        assert_eq!(normalize_url("./page"), "./page");
        assert_eq!(normalize_url("../up"), "../up");
    }
}
