// Descriptor Contract Tests
//
// These tests pin the descriptor strings and proxy command line that other
// co-simulation tools parse and produce. Changing any of them breaks
// interoperability with system structure files already written.

use fmu_proxy::{
    get_run_arguments_for_proxy_fmu, NetworkEndpoint, ProxyInstall, ProxyServer, PROXY_HEADER,
    PROXY_HEADER_OLD,
};

/// WHY: Current descriptors are read by cosim >= 0.4 from system structure files
/// FORMAT: proxyfmu://<address>[:<port>]?file=<path>
/// BREAKS: Every saved system structure that references a proxied FMU
#[test]
fn current_descriptor_format() {
    let server = ProxyServer::current(NetworkEndpoint::new("localhost", None), "models/pump.fmu");
    assert_eq!(server.endpoint_str(), "proxyfmu://localhost?file=models/pump.fmu");

    let server = ProxyServer::current(NetworkEndpoint::with_port("10.0.0.7", 9090), "pump.fmu");
    assert_eq!(server.endpoint_str(), "proxyfmu://10.0.0.7:9090?file=pump.fmu");
}

/// WHY: Legacy descriptors are read by cosim < 0.4
/// FORMAT: fmu-proxy://<address>[:<port>]?guid=<identifier>
/// BREAKS: Older simulation setups that attach by guid
#[test]
fn legacy_descriptor_format() {
    let server = ProxyServer::legacy(NetworkEndpoint::with_port("h", 9090), "g");
    assert_eq!(server.endpoint_str(), "fmu-proxy://h:9090?guid=g");

    let server = ProxyServer::legacy(NetworkEndpoint::new("h", None), "{2a3b-44}");
    assert_eq!(server.endpoint_str(), "fmu-proxy://h?guid={2a3b-44}");
}

/// WHY: Scheme prefixes are part of the wire contract
/// BREAKS: Parsers on the cosim side that match the literal prefix
#[test]
fn scheme_prefixes_are_fixed() {
    assert_eq!(PROXY_HEADER, "proxyfmu://");
    assert_eq!(PROXY_HEADER_OLD, "fmu-proxy://");
}

/// WHY: Short-form descriptors come from user configuration
/// REASON: Users write `address:port?file=...` without a scheme
/// BREAKS: Existing configuration files
#[test]
fn short_form_parses_to_same_fields() {
    let file = ProxyServer::parse("h:1234?file=f.fmu").unwrap();
    assert_eq!(file.endpoint().address(), "h");
    assert_eq!(file.endpoint().port(), Some(1234));
    assert_eq!(file.file_path_fmu(), Some("f.fmu"));
    assert!(!file.has_guid());

    let guid = ProxyServer::parse("h:1234?guid=abc").unwrap();
    assert_eq!(guid.guid(), Some("abc"));
    assert!(guid.has_guid());
    assert_eq!(guid.file_path_fmu(), None);
}

/// WHY: A rendered descriptor must parse back to the same descriptor
/// BREAKS: Round-tripping descriptors through configuration
#[test]
fn rendered_descriptors_parse_back() {
    let servers = vec![
        ProxyServer::current(NetworkEndpoint::new("localhost", None), "a/b.fmu"),
        ProxyServer::current(NetworkEndpoint::with_port("10.1.2.3", 7000), "/abs/c.fmu"),
        ProxyServer::legacy(NetworkEndpoint::with_port("h", 9090), "guid-1"),
    ];

    for server in servers {
        let parsed = ProxyServer::parse(&server.endpoint_str()).unwrap();
        assert_eq!(parsed, server, "round trip of {}", server);
    }
}

/// WHY: The proxy jar reads its arguments positionally
/// FORMAT: <runtime> -jar <jar> -thrift/tcp <port> <fmu>
/// BREAKS: The proxy server fails to start or binds the wrong port
#[test]
fn proxy_argv_is_positional() {
    let install = ProxyInstall::new("/opt/cosim");

    let in_place = get_run_arguments_for_proxy_fmu(&install, 9090, "/a/b.fmu", false);
    assert_eq!(
        in_place,
        vec![
            "java",
            "-jar",
            "/opt/cosim/osp_cosim/win64/bin_old/fmu-proxy.jar",
            "-thrift/tcp",
            "9090",
            "/a/b.fmu",
        ]
    );

    let packaged = get_run_arguments_for_proxy_fmu(&install, 9090, "/a/b.fmu", true);
    assert_eq!(packaged[2], std::path::Path::new("bin").join("fmu-proxy.jar").display().to_string());
    assert_eq!(packaged[5], "b.fmu");
}
