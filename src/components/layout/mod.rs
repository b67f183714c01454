//! Application shell: teal header, navigation and content frame.

use leptos::*;
use leptos_router::{use_location, use_navigate, A};

use crate::state::AppState;

const NAV: [(&str, &str); 6] = [
    ("Dashboard", "/"),
    ("Pacientes", "/pacientes"),
    ("Obras sociales", "/obras-sociales"),
    ("Calendario", "/calendario"),
    ("Registro de prestaciones", "/prestaciones"),
    ("Configuración", "/configuracion"),
];

fn es_activo(pathname: &str, href: &str) -> bool {
    if href == "/" {
        pathname == "/"
    } else {
        pathname == href || pathname.starts_with(&format!("{href}/"))
    }
}

/// Shell around every authenticated page.
#[component]
pub fn AppShell(children: Children) -> impl IntoView {
    let state = use_context::<AppState>().expect("AppState no provisto");
    let pathname = use_location().pathname;
    let navigate = use_navigate();
    let (menu_abierto, set_menu_abierto) = create_signal(false);

    let cerrar_sesion = {
        let navigate = navigate.clone();
        let state = state.clone();
        move || {
            state.cerrar_sesion();
            navigate("/login", Default::default());
        }
    };
    let cerrar_desktop = cerrar_sesion.clone();
    let cerrar_movil = cerrar_sesion.clone();

    view! {
        <div class="min-h-screen bg-slate-50">
            <header class="bg-[#5fb3b0] text-white shadow">
                <div class="max-w-7xl mx-auto px-4">
                    <div class="flex items-center justify-between h-14">
                        <div class="flex items-center gap-8">
                            <A href="/" class="text-lg font-bold tracking-tight">
                                "Dentissta"
                            </A>
                            <nav class="hidden md:flex items-center gap-1">
                                {NAV.map(|(label, href)| {
                                    let activo = move || es_activo(&pathname.get(), href);
                                    view! {
                                        <A
                                            href=href
                                            class=move || format!(
                                                "px-3 py-1.5 rounded-md text-sm transition-colors {}",
                                                if activo() {
                                                    "bg-white/20 font-medium"
                                                } else {
                                                    "hover:bg-white/10"
                                                }
                                            )
                                        >
                                            {label}
                                        </A>
                                    }
                                }).collect_view()}
                            </nav>
                        </div>
                        <div class="flex items-center gap-3">
                            <span class="hidden sm:inline text-sm">
                                {move || state.usuario.get().map(|u| u.nombre).unwrap_or_default()}
                            </span>
                            <button
                                class="hidden md:inline-block px-3 py-1.5 rounded-md text-sm bg-white/10 hover:bg-white/20 transition-colors"
                                on:click=move |_| cerrar_desktop()
                            >
                                "Salir"
                            </button>
                            <button
                                class="md:hidden p-2 rounded-md hover:bg-white/10"
                                on:click=move |_| set_menu_abierto.update(|v| *v = !*v)
                            >
                                <svg class="w-5 h-5" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">
                                    <path d="M4 6h16M4 12h16M4 18h16" />
                                </svg>
                            </button>
                        </div>
                    </div>
                    {move || menu_abierto.get().then(|| {
                        let cerrar = cerrar_movil.clone();
                        let navegar = navigate.clone();
                        view! {
                            <nav class="md:hidden pb-3 flex flex-col gap-1">
                                {NAV.map(|(label, href)| {
                                    let navegar = navegar.clone();
                                    view! {
                                        <button
                                            class="px-3 py-2 rounded-md text-sm text-left hover:bg-white/10"
                                            on:click=move |_| {
                                                set_menu_abierto.set(false);
                                                navegar(href, Default::default());
                                            }
                                        >
                                            {label}
                                        </button>
                                    }
                                }).collect_view()}
                                <button
                                    class="px-3 py-2 rounded-md text-sm text-left bg-white/10"
                                    on:click=move |_| cerrar()
                                >
                                    "Salir"
                                </button>
                            </nav>
                        }
                    })}
                </div>
            </header>
            <main class="max-w-7xl mx-auto px-4 py-6">
                {children()}
            </main>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefijo_activo() {
        assert!(es_activo("/", "/"));
        assert!(!es_activo("/pacientes", "/"));
        assert!(es_activo("/pacientes", "/pacientes"));
        assert!(es_activo("/pacientes/abc/notas", "/pacientes"));
        assert!(!es_activo("/pacientes-x", "/pacientes"));
    }
}
