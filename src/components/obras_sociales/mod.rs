use leptos::*;

use crate::client::{self, ObraSocial};
use crate::components::common::{Cargando, ErrorBanner};

#[component]
pub fn ObrasSocialesPage() -> impl IntoView {
    let (obras, set_obras) = create_signal(Vec::<ObraSocial>::new());
    let (cargando, set_cargando) = create_signal(true);
    let (error, set_error) = create_signal(Option::<String>::None);
    let (refresco, set_refresco) = create_signal(0u32);

    let (nombre, set_nombre) = create_signal(String::new());
    let (codigo, set_codigo) = create_signal(String::new());
    let (guardando, set_guardando) = create_signal(false);
    let (editando, set_editando) = create_signal(Option::<ObraSocial>::None);

    create_effect(move |_| {
        let _ = refresco.get();
        spawn_local(async move {
            set_cargando.set(true);
            match client::obras_sociales_list().await {
                Ok(lista) => set_obras.set(lista),
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_cargando.set(false);
        });
    });

    let crear = move |_| {
        let n = nombre.get().trim().to_string();
        if n.is_empty() {
            return;
        }
        let c = codigo.get().trim().to_string();
        set_guardando.set(true);
        set_error.set(None);
        spawn_local(async move {
            let codigo_opt = (!c.is_empty()).then_some(c.as_str());
            match client::obra_social_create(&n, codigo_opt).await {
                Ok(_) => {
                    set_nombre.set(String::new());
                    set_codigo.set(String::new());
                    set_refresco.update(|n| *n += 1);
                }
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_guardando.set(false);
        });
    };

    let borrar = move |id: String| {
        let confirmado = window()
            .confirm_with_message("¿Eliminar esta obra social? Los pacientes asociados quedarán sin cobertura.")
            .unwrap_or(false);
        if !confirmado {
            return;
        }
        spawn_local(async move {
            match client::obra_social_delete(&id).await {
                Ok(()) => set_refresco.update(|n| *n += 1),
                Err(e) => set_error.set(Some(e.to_string())),
            }
        });
    };

    view! {
        <div class="space-y-6">
            <h1 class="text-xl font-bold text-slate-800">"Obras sociales"</h1>

            <div class="bg-white rounded-xl shadow p-4 flex items-center gap-3 flex-wrap">
                <input
                    class="flex-1 min-w-[200px] px-3 py-2 rounded-lg border border-slate-200 text-sm focus:outline-none focus:border-[#5fb3b0]"
                    placeholder="Nombre"
                    prop:value=move || nombre.get()
                    on:input=move |e| set_nombre.set(event_target_value(&e))
                />
                <input
                    class="w-36 px-3 py-2 rounded-lg border border-slate-200 text-sm focus:outline-none focus:border-[#5fb3b0]"
                    placeholder="Código"
                    prop:value=move || codigo.get()
                    on:input=move |e| set_codigo.set(event_target_value(&e))
                />
                <button
                    class="px-4 py-2 rounded-lg bg-[#5fb3b0] hover:bg-[#4a9a97] text-white text-sm font-medium disabled:opacity-50"
                    disabled=move || guardando.get() || nombre.get().trim().is_empty()
                    on:click=crear
                >
                    "Agregar"
                </button>
            </div>

            <ErrorBanner mensaje=error />

            {move || if cargando.get() {
                view! { <Cargando /> }.into_view()
            } else {
                let lista = obras.get();
                if lista.is_empty() {
                    view! {
                        <p class="text-sm text-slate-400 text-center py-8">"Todavía no hay obras sociales cargadas"</p>
                    }.into_view()
                } else {
                    view! {
                        <div class="bg-white rounded-xl shadow overflow-hidden">
                            <table class="w-full text-sm">
                                <thead>
                                    <tr class="border-b border-slate-100 text-left text-xs text-slate-400 uppercase tracking-wide">
                                        <th class="px-4 py-3">"Nombre"</th>
                                        <th class="px-4 py-3">"Código"</th>
                                        <th class="px-4 py-3">"Pacientes"</th>
                                        <th class="px-4 py-3 text-right">"Acciones"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {lista.into_iter().map(|o| {
                                        let id = o.id.clone();
                                        let para_editar = o.clone();
                                        view! {
                                            <tr class="border-b border-slate-50 hover:bg-slate-50">
                                                <td class="px-4 py-3 text-slate-700">{o.nombre.clone()}</td>
                                                <td class="px-4 py-3 text-slate-500">
                                                    {o.codigo.clone().unwrap_or_else(|| "-".to_string())}
                                                </td>
                                                <td class="px-4 py-3 text-slate-500">
                                                    {o.conteo.as_ref().map(|c| c.pacientes).unwrap_or(0)}
                                                </td>
                                                <td class="px-4 py-3 text-right space-x-3">
                                                    <button
                                                        class="text-xs text-slate-500 hover:text-[#5fb3b0]"
                                                        on:click=move |_| set_editando.set(Some(para_editar.clone()))
                                                    >
                                                        "Editar"
                                                    </button>
                                                    <button
                                                        class="text-xs text-red-400 hover:text-red-600"
                                                        on:click=move |_| borrar(id.clone())
                                                    >
                                                        "Eliminar"
                                                    </button>
                                                </td>
                                            </tr>
                                        }
                                    }).collect_view()}
                                </tbody>
                            </table>
                        </div>
                    }.into_view()
                }
            }}

            {move || editando.get().map(|o| view! {
                <ModalEditarObra
                    obra=o
                    on_cerrar=move |_| set_editando.set(None)
                    on_guardado=move |_| {
                        set_editando.set(None);
                        set_refresco.update(|n| *n += 1);
                    }
                />
            })}
        </div>
    }
}

#[component]
fn ModalEditarObra(
    obra: ObraSocial,
    #[prop(into)] on_cerrar: Callback<()>,
    #[prop(into)] on_guardado: Callback<()>,
) -> impl IntoView {
    let id = obra.id.clone();
    let (nombre, set_nombre) = create_signal(obra.nombre.clone());
    let (codigo, set_codigo) = create_signal(obra.codigo.clone().unwrap_or_default());
    let (guardando, set_guardando) = create_signal(false);
    let (error, set_error) = create_signal(Option::<String>::None);

    let guardar = move |_| {
        let id = id.clone();
        let n = nombre.get().trim().to_string();
        if n.is_empty() {
            return;
        }
        let c = codigo.get().trim().to_string();
        set_guardando.set(true);
        spawn_local(async move {
            let codigo_opt = (!c.is_empty()).then_some(c.as_str());
            match client::obra_social_update(&id, &n, codigo_opt).await {
                Ok(_) => on_guardado.call(()),
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_guardando.set(false);
        });
    };

    let campo = "w-full px-3 py-2 rounded-lg border border-slate-200 text-sm focus:outline-none focus:border-[#5fb3b0]";

    view! {
        <div class="fixed inset-0 bg-black/40 z-40 flex items-center justify-center p-4">
            <div class="bg-white rounded-xl shadow-xl w-full max-w-sm">
                <div class="px-5 py-4 border-b border-slate-100 flex items-center justify-between">
                    <h2 class="font-semibold text-slate-800">"Editar obra social"</h2>
                    <button class="text-slate-400 hover:text-slate-600" on:click=move |_| on_cerrar.call(())>
                        "✕"
                    </button>
                </div>
                <div class="p-5 space-y-3">
                    <input
                        class=campo
                        placeholder="Nombre"
                        prop:value=move || nombre.get()
                        on:input=move |e| set_nombre.set(event_target_value(&e))
                    />
                    <input
                        class=campo
                        placeholder="Código"
                        prop:value=move || codigo.get()
                        on:input=move |e| set_codigo.set(event_target_value(&e))
                    />
                    {move || error.get().map(|e| view! {
                        <div class="p-2 bg-red-50 border border-red-200 rounded text-red-600 text-xs">{e}</div>
                    })}
                </div>
                <div class="px-5 py-4 border-t border-slate-100 flex justify-end gap-2">
                    <button
                        class="px-4 py-2 rounded-lg border border-slate-200 text-sm text-slate-600"
                        on:click=move |_| on_cerrar.call(())
                    >
                        "Cancelar"
                    </button>
                    <button
                        class="px-4 py-2 rounded-lg bg-[#5fb3b0] hover:bg-[#4a9a97] text-white text-sm font-medium disabled:opacity-50"
                        disabled=move || guardando.get() || nombre.get().trim().is_empty()
                        on:click=guardar
                    >
                        {move || if guardando.get() { "Guardando..." } else { "Guardar" }}
                    </button>
                </div>
            </div>
        </div>
    }
}
