/**
 * port module
 * Free local port discovery for proxy launches
 */

pub mod discovery;

pub use discovery::{check_local_port, get_local_open_port, PortProbe, TcpPortProbe, PROBE_HOST};
