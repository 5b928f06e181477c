use formsmith_application::FormBuilderService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub form_builder_service: FormBuilderService,
}
