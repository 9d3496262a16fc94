use lazy_static::lazy_static;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperatingSystem {
    Linux,
    Windows,
    Docker,
}

impl OperatingSystem {
    pub fn from_name(name: &str) -> Option<OperatingSystem> {
        match name.trim().to_lowercase().as_str() {
            "linux" => Some(OperatingSystem::Linux),
            "windows" => Some(OperatingSystem::Windows),
            "docker" => Some(OperatingSystem::Docker),
            _ => None,
        }
    }
}

impl fmt::Display for OperatingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperatingSystem::Linux => write!(f, "linux"),
            OperatingSystem::Windows => write!(f, "windows"),
            OperatingSystem::Docker => write!(f, "docker"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JavaVersion {
    Java8,
    Java11,
    Java17,
}

impl JavaVersion {
    pub fn from_name(name: &str) -> Option<JavaVersion> {
        let normalized = name.trim().to_lowercase();
        let normalized = normalized.replace("java", "");
        match normalized.trim() {
            "8" | "1.8" => Some(JavaVersion::Java8),
            "11" => Some(JavaVersion::Java11),
            "17" => Some(JavaVersion::Java17),
            _ => None,
        }
    }
}

impl fmt::Display for JavaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JavaVersion::Java8 => write!(f, "java 8"),
            JavaVersion::Java11 => write!(f, "java 11"),
            JavaVersion::Java17 => write!(f, "java 17"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WebContainer {
    Tomcat85,
    Tomcat90,
    Tomcat100,
    JBossEap72,
    JavaSe,
}

impl WebContainer {
    pub fn from_name(name: &str) -> Option<WebContainer> {
        let normalized = name.trim().to_lowercase();
        let normalized = normalized.split_whitespace().collect::<Vec<_>>().join(" ");
        match normalized.as_str() {
            "tomcat 8.5" | "tomcat8.5" => Some(WebContainer::Tomcat85),
            "tomcat 9.0" | "tomcat9.0" => Some(WebContainer::Tomcat90),
            "tomcat 10.0" | "tomcat10.0" => Some(WebContainer::Tomcat100),
            "jbosseap 7.2" | "jboss 7.2" => Some(WebContainer::JBossEap72),
            "java se" | "javase" => Some(WebContainer::JavaSe),
            _ => None,
        }
    }
}

impl fmt::Display for WebContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebContainer::Tomcat85 => write!(f, "tomcat 8.5"),
            WebContainer::Tomcat90 => write!(f, "tomcat 9.0"),
            WebContainer::Tomcat100 => write!(f, "tomcat 10.0"),
            WebContainer::JBossEap72 => write!(f, "jbosseap 7.2"),
            WebContainer::JavaSe => write!(f, "java se"),
        }
    }
}

/// The execution environment of a deployment slot. A slot either runs a
/// managed stack or a user-supplied container image, never both.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Runtime {
    Managed {
        os: OperatingSystem,
        web_container: WebContainer,
        java_version: JavaVersion,
    },
    Docker,
}

lazy_static! {
    static ref SUPPORTED_RUNTIMES: Vec<(OperatingSystem, WebContainer, JavaVersion)> = {
        use JavaVersion::*;
        use OperatingSystem::*;
        use WebContainer::*;

        let mut supported = Vec::new();
        for os in [Linux, Windows] {
            for java in [Java8, Java11] {
                supported.push((os, Tomcat85, java));
            }
            for java in [Java8, Java11, Java17] {
                supported.push((os, Tomcat90, java));
                supported.push((os, JavaSe, java));
            }
            for java in [Java11, Java17] {
                supported.push((os, Tomcat100, java));
            }
        }
        for java in [Java8, Java11] {
            supported.push((Linux, JBossEap72, java));
        }
        supported
    };
}

impl Runtime {
    /// Looks up the (os, container, java) triple in the supported stack
    /// table. Container-image deployments do not go through here.
    pub fn from_parts(
        os: OperatingSystem,
        web_container: WebContainer,
        java_version: JavaVersion,
    ) -> Option<Runtime> {
        if SUPPORTED_RUNTIMES.contains(&(os, web_container, java_version)) {
            Some(Runtime::Managed {
                os,
                web_container,
                java_version,
            })
        } else {
            None
        }
    }
}
