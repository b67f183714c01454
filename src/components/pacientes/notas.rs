use leptos::*;
use leptos_router::{use_params_map, A};

use crate::client::{self, Nota};
use crate::components::common::Cargando;
use crate::utils::fechas::formatear_fecha_hora;

#[component]
pub fn PacienteNotasPage() -> impl IntoView {
    let params = use_params_map();
    let paciente_id = move || params.with(|p| p.get("id").cloned().unwrap_or_default());

    let (notas, set_notas) = create_signal(Vec::<Nota>::new());
    let (cargando, set_cargando) = create_signal(true);
    let (error, set_error) = create_signal(Option::<String>::None);
    let (refresco, set_refresco) = create_signal(0u32);

    let (titulo, set_titulo) = create_signal(String::new());
    let (descripcion, set_descripcion) = create_signal(String::new());
    let (profesional, set_profesional) = create_signal("Micaela Ancarola".to_string());
    let (guardando, set_guardando) = create_signal(false);

    create_effect(move |_| {
        let _ = refresco.get();
        let id = paciente_id();
        if id.is_empty() {
            return;
        }
        spawn_local(async move {
            set_cargando.set(true);
            match client::notas_por_paciente(&id).await {
                Ok(lista) => set_notas.set(lista),
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_cargando.set(false);
        });
    });

    let guardar = move |_| {
        let id = paciente_id();
        let t = titulo.get().trim().to_string();
        let d = descripcion.get().trim().to_string();
        let prof = profesional.get().trim().to_string();
        if t.is_empty() || d.is_empty() {
            return;
        }
        set_guardando.set(true);
        set_error.set(None);
        spawn_local(async move {
            let cuerpo = serde_json::json!({
                "pacienteId": id,
                "titulo": t,
                "descripcion": d,
                "profesional": prof,
            });
            match client::nota_create(&cuerpo).await {
                Ok(_) => {
                    set_titulo.set(String::new());
                    set_descripcion.set(String::new());
                    set_refresco.update(|n| *n += 1);
                }
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_guardando.set(false);
        });
    };

    let borrar = move |nota_id: String| {
        spawn_local(async move {
            match client::nota_delete(&nota_id).await {
                Ok(()) => set_refresco.update(|n| *n += 1),
                Err(e) => set_error.set(Some(e.to_string())),
            }
        });
    };

    view! {
        <div class="space-y-6">
            <div class="flex items-center gap-3">
                <A href=move || format!("/pacientes/{}", paciente_id()) class="text-sm text-[#5fb3b0] hover:underline">
                    "← Volver a la ficha"
                </A>
                <h1 class="text-xl font-bold text-slate-800">"Notas clínicas"</h1>
            </div>

            <div class="bg-white rounded-xl shadow p-4 space-y-3">
                <input
                    class="w-full px-3 py-2 rounded-lg border border-slate-200 text-sm focus:outline-none focus:border-[#5fb3b0]"
                    placeholder="Título"
                    prop:value=move || titulo.get()
                    on:input=move |e| set_titulo.set(event_target_value(&e))
                />
                <textarea
                    class="w-full px-3 py-2 rounded-lg border border-slate-200 text-sm focus:outline-none focus:border-[#5fb3b0]"
                    rows=3
                    placeholder="Descripción"
                    prop:value=move || descripcion.get()
                    on:input=move |e| set_descripcion.set(event_target_value(&e))
                />
                <div class="flex items-center gap-3">
                    <input
                        class="flex-1 px-3 py-2 rounded-lg border border-slate-200 text-sm focus:outline-none focus:border-[#5fb3b0]"
                        placeholder="Profesional"
                        prop:value=move || profesional.get()
                        on:input=move |e| set_profesional.set(event_target_value(&e))
                    />
                    <button
                        class="px-4 py-2 rounded-lg bg-[#5fb3b0] hover:bg-[#4a9a97] text-white text-sm font-medium disabled:opacity-50"
                        disabled=move || guardando.get() || titulo.get().trim().is_empty() || descripcion.get().trim().is_empty()
                        on:click=guardar
                    >
                        {move || if guardando.get() { "Guardando..." } else { "Agregar nota" }}
                    </button>
                </div>
                {move || error.get().map(|e| view! {
                    <div class="p-2 bg-red-50 border border-red-200 rounded text-red-600 text-xs">{e}</div>
                })}
            </div>

            {move || if cargando.get() {
                view! { <Cargando /> }.into_view()
            } else {
                let lista = notas.get();
                if lista.is_empty() {
                    view! {
                        <p class="text-sm text-slate-400 text-center py-8">"Todavía no hay notas para este paciente"</p>
                    }.into_view()
                } else {
                    lista.into_iter().map(|n| {
                        let nota_id = n.id.clone();
                        view! {
                            <div class="bg-white rounded-xl shadow p-4">
                                <div class="flex items-start justify-between gap-3">
                                    <div>
                                        <h3 class="text-sm font-semibold text-slate-700">{n.titulo.clone()}</h3>
                                        <p class="text-xs text-slate-400 mt-0.5">
                                            {formatear_fecha_hora(&n.fecha)}
                                            {(!n.profesional.is_empty()).then(|| format!(" · {}", n.profesional)).unwrap_or_default()}
                                        </p>
                                    </div>
                                    <button
                                        class="text-xs text-red-400 hover:text-red-600"
                                        on:click=move |_| borrar(nota_id.clone())
                                    >
                                        "Eliminar"
                                    </button>
                                </div>
                                <p class="text-sm text-slate-600 mt-2 whitespace-pre-wrap">{n.descripcion.clone()}</p>
                            </div>
                        }
                    }).collect_view()
                }
            }}
        </div>
    }
}
