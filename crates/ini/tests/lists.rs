use ini_rs::{Binder, Schema};

#[derive(Debug, Default)]
struct Upstream {
    servers: Vec<String>,
    weights: Vec<u8>,
    alias: Option<String>,
}

impl Schema for Upstream {
    fn bind<'a>(&'a mut self, b: &mut Binder<'a>) {
        b.field("server", &mut self.servers);
        b.field("weight", &mut self.weights);
        b.field("alias", &mut self.alias);
    }
}

#[derive(Debug, Default)]
struct Proxy {
    upstream: Upstream,
}

impl Schema for Proxy {
    fn bind<'a>(&'a mut self, b: &mut Binder<'a>) {
        b.record("[upstream]", &mut self.upstream);
    }
}

#[test]
fn repeated_keys_append_in_order() -> Result<(), Box<dyn std::error::Error>> {
    let mut input = String::from("[upstream]\n");
    for i in 0..25 {
        input.push_str(&format!("server = host{i}:80\n"));
    }
    let mut p = Proxy::default();
    ini_rs::from_str(&input, &mut p)?;
    assert_eq!(p.upstream.servers.len(), 25);
    assert_eq!(p.upstream.servers[0], "host0:80");
    assert_eq!(p.upstream.servers[24], "host24:80");
    Ok(())
}

#[test]
fn bad_element_is_not_appended() {
    let mut p = Proxy::default();
    let outcome = ini_rs::decode(b"[upstream]\nweight=1\nweight=900\nweight=3\n", &mut p);
    assert_eq!(outcome.error.as_ref().and_then(|e| e.line()), Some(3));
    assert_eq!(p.upstream.weights, vec![1, 3]);
}

#[test]
fn option_fields() -> Result<(), Box<dyn std::error::Error>> {
    let mut p = Proxy::default();
    ini_rs::from_str("[upstream]\nserver=a\n", &mut p)?;
    assert_eq!(p.upstream.alias, None);
    ini_rs::from_str("[upstream]\nalias = edge\n", &mut p)?;
    assert_eq!(p.upstream.alias.as_deref(), Some("edge"));
    // decoding into the same record keeps appending
    assert_eq!(p.upstream.servers, vec!["a".to_string()]);
    Ok(())
}
