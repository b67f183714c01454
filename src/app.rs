//! Root component: session bootstrap and route table.

use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::{use_navigate, Redirect, Route, Router, Routes};

use crate::components::auth::LoginPage;
use crate::components::citas::{CalendarioPage, CitaDetallePage};
use crate::components::configuracion::ConfiguracionPage;
use crate::components::dashboard::DashboardPage;
use crate::components::historia::{HistoriaClinicaCitaPage, HistoriaClinicaPacientePage};
use crate::components::layout::AppShell;
use crate::components::obras_sociales::ObrasSocialesPage;
use crate::components::odontograma::OdontogramaPage;
use crate::components::pacientes::{
    PacienteDetallePage, PacienteHistorialPage, PacienteImagenesPage, PacienteNotasPage,
    PacientesPage,
};
use crate::components::prestaciones::{PrestacionesListPage, RegistroPrestacionesPage};
use crate::state::AppState;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let state = AppState::new();
    provide_context(state.clone());
    spawn_local(async move {
        state.validar_sesion().await;
    });

    view! {
        <Title text="Dentissta" />
        <Router>
            <Routes>
                // Login - no shell
                <Route path="/login" view=LoginPage />

                <Route path="/" view=|| view! { <Protegido><DashboardPage /></Protegido> } />

                <Route path="/pacientes" view=|| view! { <Protegido><PacientesPage /></Protegido> } />
                <Route path="/pacientes/:id" view=|| view! { <Protegido><PacienteDetallePage /></Protegido> } />
                <Route path="/pacientes/:id/notas" view=|| view! { <Protegido><PacienteNotasPage /></Protegido> } />
                <Route path="/pacientes/:id/imagenes" view=|| view! { <Protegido><PacienteImagenesPage /></Protegido> } />
                <Route path="/pacientes/:id/historial" view=|| view! { <Protegido><PacienteHistorialPage /></Protegido> } />
                <Route path="/pacientes/:id/historia-clinica" view=|| view! { <Protegido><HistoriaClinicaPacientePage /></Protegido> } />

                <Route path="/obras-sociales" view=|| view! { <Protegido><ObrasSocialesPage /></Protegido> } />
                <Route path="/odontograma/:id" view=|| view! { <Protegido><OdontogramaPage /></Protegido> } />
                <Route path="/calendario" view=|| view! { <Protegido><CalendarioPage /></Protegido> } />

                <Route path="/prestaciones" view=|| view! { <Protegido><PrestacionesListPage /></Protegido> } />
                <Route path="/citas/:id" view=|| view! { <Protegido><CitaDetallePage /></Protegido> } />
                <Route path="/citas/:id/prestaciones" view=|| view! { <Protegido><RegistroPrestacionesPage /></Protegido> } />
                <Route path="/citas/:id/historia-clinica" view=|| view! { <Protegido><HistoriaClinicaCitaPage /></Protegido> } />

                <Route path="/configuracion" view=|| view! { <Protegido><ConfiguracionPage /></Protegido> } />

                <Route path="/*" view=|| view! { <Redirect path="/" /> } />
            </Routes>
        </Router>
    }
}

/// Layout gate: everything inside it needs a validated session.
#[component]
fn Protegido(children: Children) -> impl IntoView {
    let state = expect_context::<AppState>();

    {
        let state = state.clone();
        let navigate = use_navigate();
        create_effect(move |_| {
            if !state.cargando.get() && state.usuario.with(|u| u.is_none()) {
                navigate("/login", Default::default());
            }
        });
    }

    let contenido = children().into_view();
    move || {
        if state.cargando.get() {
            view! {
                <div class="min-h-screen flex items-center justify-center bg-slate-50">
                    <div class="text-slate-400 text-sm">"Cargando..."</div>
                </div>
            }
            .into_view()
        } else if state.sesion_activa() {
            let contenido = contenido.clone();
            view! {
                <AppShell>{contenido}</AppShell>
            }
            .into_view()
        } else {
            ().into_view()
        }
    }
}
