use leptos::*;
use leptos_router::{use_params_map, A};
use wasm_bindgen::JsCast;

use crate::client::{self, upload_url, Imagen};
use crate::components::common::Cargando;
use crate::utils::fechas::formatear_fecha;

#[component]
pub fn PacienteImagenesPage() -> impl IntoView {
    let params = use_params_map();
    let paciente_id = move || params.with(|p| p.get("id").cloned().unwrap_or_default());

    let (imagenes, set_imagenes) = create_signal(Vec::<Imagen>::new());
    let (cargando, set_cargando) = create_signal(true);
    let (error, set_error) = create_signal(Option::<String>::None);
    let (refresco, set_refresco) = create_signal(0u32);

    let (descripcion, set_descripcion) = create_signal(String::new());
    let (subiendo, set_subiendo) = create_signal(false);
    let (ampliada, set_ampliada) = create_signal(Option::<Imagen>::None);

    create_effect(move |_| {
        let _ = refresco.get();
        let id = paciente_id();
        if id.is_empty() {
            return;
        }
        spawn_local(async move {
            set_cargando.set(true);
            match client::imagenes_por_paciente(&id).await {
                Ok(lista) => set_imagenes.set(lista),
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_cargando.set(false);
        });
    });

    // Lock body scroll while the lightbox is open.
    create_effect(move |_| {
        let abierta = ampliada.with(|a| a.is_some());
        if let Some(body) = window().document().and_then(|d| d.body()) {
            let _ = body
                .style()
                .set_property("overflow", if abierta { "hidden" } else { "" });
        }
    });

    let subir = move |ev: web_sys::Event| {
        let entrada: web_sys::HtmlInputElement = match ev.target().and_then(|t| t.dyn_into().ok()) {
            Some(e) => e,
            None => return,
        };
        let archivo = match entrada.files().and_then(|f| f.get(0)) {
            Some(f) => f,
            None => return,
        };
        entrada.set_value("");
        let id = paciente_id();
        let desc = descripcion.get().trim().to_string();
        set_subiendo.set(true);
        set_error.set(None);
        spawn_local(async move {
            let desc_opt = (!desc.is_empty()).then_some(desc.as_str());
            match client::imagen_upload(&id, &archivo, desc_opt, None, None).await {
                Ok(_) => {
                    set_descripcion.set(String::new());
                    set_refresco.update(|n| *n += 1);
                }
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_subiendo.set(false);
        });
    };

    let borrar = move |imagen_id: String| {
        spawn_local(async move {
            match client::imagen_delete(&imagen_id).await {
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
                <h1 class="text-xl font-bold text-slate-800">"Imágenes"</h1>
            </div>

            <div class="bg-white rounded-xl shadow p-4 flex items-center gap-3 flex-wrap">
                <input
                    class="flex-1 min-w-[200px] px-3 py-2 rounded-lg border border-slate-200 text-sm focus:outline-none focus:border-[#5fb3b0]"
                    placeholder="Descripción (opcional)"
                    prop:value=move || descripcion.get()
                    on:input=move |e| set_descripcion.set(event_target_value(&e))
                />
                <label class="px-4 py-2 rounded-lg bg-[#5fb3b0] hover:bg-[#4a9a97] text-white text-sm font-medium cursor-pointer">
                    {move || if subiendo.get() { "Subiendo..." } else { "Subir imagen" }}
                    <input
                        type="file"
                        accept="image/*"
                        class="hidden"
                        disabled=move || subiendo.get()
                        on:change=subir
                    />
                </label>
                {move || error.get().map(|e| view! {
                    <div class="w-full p-2 bg-red-50 border border-red-200 rounded text-red-600 text-xs">{e}</div>
                })}
            </div>

            {move || if cargando.get() {
                view! { <Cargando /> }.into_view()
            } else {
                let lista = imagenes.get();
                if lista.is_empty() {
                    view! {
                        <p class="text-sm text-slate-400 text-center py-8">"Todavía no hay imágenes para este paciente"</p>
                    }.into_view()
                } else {
                    view! {
                        <div class="grid grid-cols-2 md:grid-cols-3 lg:grid-cols-4 gap-4">
                            {lista.into_iter().map(|img| {
                                let imagen_id = img.id.clone();
                                let para_ampliar = img.clone();
                                view! {
                                    <div class="bg-white rounded-xl shadow overflow-hidden">
                                        <img
                                            src=upload_url(&img.url)
                                            alt=img.descripcion.clone().unwrap_or_default()
                                            class="w-full h-40 object-cover cursor-pointer"
                                            on:click=move |_| set_ampliada.set(Some(para_ampliar.clone()))
                                            on:error=move |e| {
                                                if let Some(el) = e.target().and_then(|t| t.dyn_into::<web_sys::HtmlElement>().ok()) {
                                                    let _ = el.set_attribute("src", "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' width='160' height='160'%3E%3Crect fill='%23f1f5f9' width='160' height='160'/%3E%3C/svg%3E");
                                                }
                                            }
                                        />
                                        <div class="p-3">
                                            <p class="text-xs text-slate-600 truncate">
                                                {img.descripcion.clone().unwrap_or_else(|| "Sin descripción".to_string())}
                                            </p>
                                            <div class="flex items-center justify-between mt-1">
                                                <span class="text-xs text-slate-400">{formatear_fecha(&img.fecha)}</span>
                                                <button
                                                    class="text-xs text-red-400 hover:text-red-600"
                                                    on:click=move |_| borrar(imagen_id.clone())
                                                >
                                                    "Eliminar"
                                                </button>
                                            </div>
                                        </div>
                                    </div>
                                }
                            }).collect_view()}
                        </div>
                    }.into_view()
                }
            }}

            {move || ampliada.get().map(|img| view! {
                <div
                    class="fixed inset-0 bg-black/70 z-50 flex items-center justify-center p-6"
                    on:click=move |_| set_ampliada.set(None)
                    on:keydown=move |e: web_sys::KeyboardEvent| {
                        if e.key() == "Escape" {
                            set_ampliada.set(None);
                        }
                    }
                    tabindex=0
                >
                    <div class="max-w-4xl max-h-full">
                        <img src=upload_url(&img.url) class="max-h-[85vh] rounded-lg shadow-2xl" />
                        {img.descripcion.clone().map(|d| view! {
                            <p class="text-white text-sm text-center mt-3">{d}</p>
                        })}
                    </div>
                </div>
            })}
        </div>
    }
}
