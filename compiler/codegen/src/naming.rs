//! Generated identifier names.
//!
//! Every exported name is derived from the service's and method's Go names;
//! unexported companions fold only the first character.

use ir::{MethodRef, ServiceDef};
use names::unexport;

/// Names declared once per service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceNames {
    /// `<Svc>Client`
    pub client: String,
    /// `<svc>Client`
    pub client_impl: String,
    /// `New<Svc>Client`
    pub client_constructor: String,
    /// `<Svc>Service`
    pub service: String,
    /// `Unstable<Svc>Service`
    pub unstable: String,
    /// `Register<Svc>Service`
    pub register: String,
    /// `New<Svc>Service`
    pub service_constructor: String,
}

impl ServiceNames {
    /// Derive the per-service names
    pub fn new(service: &ServiceDef) -> Self {
        let go = &service.go_name;
        let client = format!("{}Client", go);
        let service_type = format!("{}Service", go);
        Self {
            client_impl: unexport(&client),
            client_constructor: format!("New{}", client),
            unstable: format!("Unstable{}", service_type),
            register: format!("Register{}", service_type),
            service_constructor: format!("New{}", service_type),
            client,
            service: service_type,
        }
    }
}

/// Names declared once per method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodNames {
    /// `/<package.Service>/<Method>`, using proto names
    pub full_method: String,
    /// Unexported adapter on the service struct
    pub adapter: String,
    /// `<svc><Method>StreamDesc`
    pub stream_desc: String,
    /// `<Svc>_<Method>Client`
    pub client_stream: String,
    /// `<svc><Method>Client`
    pub client_stream_impl: String,
    /// `<Svc>_<Method>Server`
    pub server_stream: String,
    /// `<svc><Method>Server`
    pub server_stream_impl: String,
}

impl MethodNames {
    /// Derive the per-method names
    pub fn new(method: MethodRef<'_>) -> Self {
        let svc = &method.parent.go_name;
        let m = &method.method.go_name;
        let lowered = unexport(svc);
        Self {
            full_method: full_method_name(method),
            adapter: unexport(m),
            stream_desc: format!("{}{}StreamDesc", lowered, m),
            client_stream: format!("{}_{}Client", svc, m),
            client_stream_impl: format!("{}{}Client", lowered, m),
            server_stream: format!("{}_{}Server", svc, m),
            server_stream_impl: format!("{}{}Server", lowered, m),
        }
    }
}

/// `/<package.Service>/<Method>`
pub fn full_method_name(method: MethodRef<'_>) -> String {
    format!("/{}/{}", method.parent.full_name, method.method.name)
}

#[cfg(test)]
mod tests {
    use ir::fixtures::{greeter_file, route_guide_file};

    use super::*;

    #[test]
    fn test_service_names() {
        let file = greeter_file();
        let names = ServiceNames::new(&file.services[0]);
        assert_eq!(names.client, "GreeterClient");
        assert_eq!(names.client_impl, "greeterClient");
        assert_eq!(names.client_constructor, "NewGreeterClient");
        assert_eq!(names.service, "GreeterService");
        assert_eq!(names.unstable, "UnstableGreeterService");
        assert_eq!(names.register, "RegisterGreeterService");
        assert_eq!(names.service_constructor, "NewGreeterService");
    }

    #[test]
    fn test_method_names() {
        let file = route_guide_file();
        let method = file.services[0].method_refs().nth(3).expect("RouteChat exists");
        let names = MethodNames::new(method);
        assert_eq!(names.full_method, "/routeguide.RouteGuide/RouteChat");
        assert_eq!(names.adapter, "routeChat");
        assert_eq!(names.stream_desc, "routeGuideRouteChatStreamDesc");
        assert_eq!(names.client_stream, "RouteGuide_RouteChatClient");
        assert_eq!(names.client_stream_impl, "routeGuideRouteChatClient");
        assert_eq!(names.server_stream, "RouteGuide_RouteChatServer");
        assert_eq!(names.server_stream_impl, "routeGuideRouteChatServer");
    }

    #[test]
    fn test_unexported_names_differ_only_in_first_character() {
        let file = route_guide_file();
        let svc = &file.services[0];
        let service = ServiceNames::new(svc);
        assert_eq!(service.client[1..], service.client_impl[1..]);
        for method in svc.method_refs() {
            let names = MethodNames::new(method);
            assert_eq!(names.adapter[1..], method.method.go_name[1..]);
            assert!(names.adapter.starts_with(|c: char| c.is_ascii_lowercase()));
        }
    }
}
