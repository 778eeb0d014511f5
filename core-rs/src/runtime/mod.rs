//! Runtime precondition checks
//!
//! The proxy jar bridges into native code that only works against a narrow
//! range of Java 8 builds. Before a local proxy is started the installed
//! runtime is asked for its version:
//!
//! ```text
//! $ java -version
//! java version "1.8.0_281"        → accepted
//! openjdk version "1.8.0_412"     → rejected (build > 333)
//! openjdk version "11.0.2"        → rejected (not 1.8.0)
//! ```

mod java;

pub use java::{
    check_java_version_for_fmu_proxy, JavaRuntime, JavaVersion, VersionSource,
    DEFAULT_RUNTIME, MAX_SUPPORTED_BUILD, SUPPORTED_VERSION_LINE,
};
