//! Login page.

use leptos::*;
use leptos_router::use_navigate;

use crate::state::AppState;

#[component]
pub fn LoginPage() -> impl IntoView {
    let state = use_context::<AppState>().expect("AppState no provisto");
    let navigate = use_navigate();

    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (error, set_error) = create_signal(Option::<String>::None);
    let (enviando, set_enviando) = create_signal(false);

    let ingresar = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let state = state.clone();
        let navigate = navigate.clone();
        let mail = email.get();
        let pass = password.get();
        set_enviando.set(true);
        set_error.set(None);
        spawn_local(async move {
            match state.iniciar_sesion(&mail, &pass).await {
                Ok(()) => navigate("/", Default::default()),
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_enviando.set(false);
        });
    };

    view! {
        <div class="min-h-screen bg-slate-50 flex items-center justify-center px-4">
            <div class="w-full max-w-sm">
                <div class="text-center mb-6">
                    <h1 class="text-3xl font-bold text-[#5fb3b0]">"Dentissta"</h1>
                    <p class="text-slate-500 text-sm mt-1">"Gestión del consultorio"</p>
                </div>
                <form class="bg-white rounded-xl shadow p-6 space-y-4" on:submit=ingresar>
                    <div class="space-y-1">
                        <label class="text-sm text-slate-600">"Email"</label>
                        <input
                            type="email"
                            class="w-full px-3 py-2 rounded-lg border border-slate-200 text-sm focus:outline-none focus:ring-2 focus:ring-[#5fb3b0]"
                            prop:value=move || email.get()
                            on:input=move |e| set_email.set(event_target_value(&e))
                        />
                    </div>
                    <div class="space-y-1">
                        <label class="text-sm text-slate-600">"Contraseña"</label>
                        <input
                            type="password"
                            class="w-full px-3 py-2 rounded-lg border border-slate-200 text-sm focus:outline-none focus:ring-2 focus:ring-[#5fb3b0]"
                            prop:value=move || password.get()
                            on:input=move |e| set_password.set(event_target_value(&e))
                        />
                    </div>
                    {move || error.get().map(|e| view! {
                        <div class="p-3 bg-red-50 border border-red-200 rounded-lg text-red-600 text-sm">
                            {e}
                        </div>
                    })}
                    <button
                        type="submit"
                        class="w-full py-2 rounded-lg bg-[#5fb3b0] hover:bg-[#4a9a97] text-white text-sm font-medium transition-colors disabled:opacity-50"
                        disabled=move || enviando.get()
                    >
                        {move || if enviando.get() { "Ingresando..." } else { "Ingresar" }}
                    </button>
                    <p class="text-xs text-slate-400 text-center">
                        "Demo: admin@dentissta.com / admin123"
                    </p>
                </form>
            </div>
        </div>
    }
}
