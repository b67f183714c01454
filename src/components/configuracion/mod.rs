//! Estado-diente palette management.

use leptos::*;

use crate::client::{self, EstadoDiente};
use crate::components::common::{Cargando, ErrorBanner};
use crate::utils::color::accent_color;

const SIMBOLOS: [(&str, &str); 6] = [
    ("NINGUNO", "Ninguno"),
    ("X", "Cruz"),
    ("ARCO", "Arco"),
    ("RECTANGULO", "Rectángulo"),
    ("CIRCULO", "Círculo"),
    ("PUNTO", "Punto"),
];

/// Normalizes a display name into a stable clave: uppercase, spaces to `_`.
fn clave_desde_nombre(nombre: &str) -> String {
    nombre
        .trim()
        .to_uppercase()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

#[component]
pub fn ConfiguracionPage() -> impl IntoView {
    let (estados, set_estados) = create_signal(Vec::<EstadoDiente>::new());
    let (cargando, set_cargando) = create_signal(true);
    let (error, set_error) = create_signal(Option::<String>::None);
    let (refresco, set_refresco) = create_signal(0u32);
    let (editando, set_editando) = create_signal(Option::<EstadoDiente>::None);
    let (mostrar_alta, set_mostrar_alta) = create_signal(false);

    create_effect(move |_| {
        let _ = refresco.get();
        spawn_local(async move {
            set_cargando.set(true);
            match client::estados_diente_list().await {
                Ok(mut lista) => {
                    lista.sort_by_key(|e| e.orden);
                    set_estados.set(lista);
                }
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_cargando.set(false);
        });
    });

    let borrar = move |id: String| {
        let confirmado = window()
            .confirm_with_message(
                "¿Eliminar este estado? Los dientes marcados con él quedarán sin referencia en la paleta.",
            )
            .unwrap_or(false);
        if !confirmado {
            return;
        }
        spawn_local(async move {
            match client::estado_diente_delete(&id).await {
                Ok(()) => set_refresco.update(|n| *n += 1),
                Err(e) => set_error.set(Some(e.to_string())),
            }
        });
    };

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-xl font-bold text-slate-800">"Configuración"</h1>
                    <p class="text-sm text-slate-400 mt-0.5">"Estados de diente disponibles en el odontograma"</p>
                </div>
                <button
                    class="px-4 py-2 rounded-lg bg-[#5fb3b0] hover:bg-[#4a9a97] text-white text-sm font-medium"
                    on:click=move |_| set_mostrar_alta.set(true)
                >
                    "+ Nuevo estado"
                </button>
            </div>

            <ErrorBanner mensaje=error />

            {move || if cargando.get() {
                view! { <Cargando /> }.into_view()
            } else {
                let lista = estados.get();
                if lista.is_empty() {
                    view! {
                        <p class="text-sm text-slate-400 text-center py-8">"Sin estados configurados"</p>
                    }.into_view()
                } else {
                    view! {
                        <div class="bg-white rounded-xl shadow divide-y divide-slate-50">
                            {lista.into_iter().map(|e| {
                                let id = e.id.clone();
                                let para_editar = e.clone();
                                view! {
                                    <div class="flex items-center gap-4 px-4 py-3">
                                        <SimboloPreview color=e.color.clone() simbolo=e.simbolo.clone() />
                                        <div class="flex-1">
                                            <div class="text-sm text-slate-700 font-medium">{e.nombre.clone()}</div>
                                            <div class="text-xs text-slate-400 font-mono">{e.clave.clone()}</div>
                                        </div>
                                        <span class="text-xs text-slate-400">"Orden "{e.orden}</span>
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
                                    </div>
                                }
                            }).collect_view()}
                        </div>
                    }.into_view()
                }
            }}

            {move || mostrar_alta.get().then(|| view! {
                <ModalEstado
                    estado=None
                    on_cerrar=move |_| set_mostrar_alta.set(false)
                    on_guardado=move |_| {
                        set_mostrar_alta.set(false);
                        set_refresco.update(|n| *n += 1);
                    }
                />
            })}
            {move || editando.get().map(|e| view! {
                <ModalEstado
                    estado=Some(e)
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

/// Tooth-cell thumbnail: fill color plus the símbolo, accent-stroked so it
/// stays visible over light fills.
#[component]
pub fn SimboloPreview(color: String, simbolo: Option<String>) -> impl IntoView {
    let trazo = accent_color(&color);
    let marca = simbolo.filter(|s| s != "NINGUNO");

    view! {
        <svg width=32 height=32 viewBox="0 0 32 32" class="shrink-0">
            <rect x=1 y=1 width=30 height=30 rx=6 fill=color.clone() stroke="#cbd5e1" stroke-width=1 />
            {marca.map(|s| match s.as_str() {
                "X" => view! {
                    <line x1=9 y1=9 x2=23 y2=23 stroke=trazo.clone() stroke-width=2 stroke-linecap="round" />
                    <line x1=23 y1=9 x2=9 y2=23 stroke=trazo.clone() stroke-width=2 stroke-linecap="round" />
                }.into_view(),
                "ARCO" => view! {
                    <path d="M 7 21 Q 16 7 25 21" fill="none" stroke=trazo.clone() stroke-width=2 stroke-linecap="round" />
                }.into_view(),
                "RECTANGULO" => view! {
                    <rect x=8 y=11 width=16 height=10 fill="none" stroke=trazo.clone() stroke-width=2 />
                }.into_view(),
                "CIRCULO" => view! {
                    <circle cx=16 cy=16 r=7 fill="none" stroke=trazo.clone() stroke-width=2 />
                }.into_view(),
                "PUNTO" => view! { <circle cx=16 cy=16 r=3.5 fill=trazo.clone() /> }.into_view(),
                _ => ().into_view(),
            })}
        </svg>
    }
}

#[component]
fn ModalEstado(
    estado: Option<EstadoDiente>,
    #[prop(into)] on_cerrar: Callback<()>,
    #[prop(into)] on_guardado: Callback<()>,
) -> impl IntoView {
    let id_edicion = estado.as_ref().map(|e| e.id.clone());
    let es_edicion = id_edicion.is_some();
    let (nombre, set_nombre) = create_signal(estado.as_ref().map(|e| e.nombre.clone()).unwrap_or_default());
    let (color, set_color) = create_signal(
        estado
            .as_ref()
            .map(|e| e.color.clone())
            .unwrap_or_else(|| "#5fb3b0".to_string()),
    );
    let (orden, set_orden) = create_signal(estado.as_ref().map(|e| e.orden.to_string()).unwrap_or_default());
    let (simbolo, set_simbolo) = create_signal(
        estado
            .as_ref()
            .and_then(|e| e.simbolo.clone())
            .unwrap_or_else(|| "NINGUNO".to_string()),
    );
    let (guardando, set_guardando) = create_signal(false);
    let (error, set_error) = create_signal(Option::<String>::None);

    let guardar = move |_| {
        let n = nombre.get().trim().to_string();
        if n.is_empty() {
            set_error.set(Some("Falta el nombre del estado".to_string()));
            return;
        }
        let id_edicion = id_edicion.clone();
        let cuerpo = serde_json::json!({
            "clave": clave_desde_nombre(&n),
            "nombre": n,
            "color": color.get(),
            "orden": orden.get().trim().parse::<i32>().unwrap_or(0),
            "simbolo": simbolo.get(),
        });
        set_guardando.set(true);
        set_error.set(None);
        spawn_local(async move {
            let resultado = match id_edicion {
                Some(id) => client::estado_diente_update(&id, &cuerpo).await.map(|_| ()),
                None => client::estado_diente_create(&cuerpo).await.map(|_| ()),
            };
            match resultado {
                Ok(()) => on_guardado.call(()),
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_guardando.set(false);
        });
    };

    let campo = "w-full px-3 py-2 rounded-lg border border-slate-200 text-sm focus:outline-none focus:border-[#5fb3b0]";

    view! {
        <div class="fixed inset-0 bg-black/40 z-40 flex items-center justify-center p-4">
            <div class="bg-white rounded-xl shadow-xl w-full max-w-md">
                <div class="px-5 py-4 border-b border-slate-100 flex items-center justify-between">
                    <h2 class="font-semibold text-slate-800">
                        {if es_edicion { "Editar estado" } else { "Nuevo estado" }}
                    </h2>
                    <button class="text-slate-400 hover:text-slate-600" on:click=move |_| on_cerrar.call(())>
                        "✕"
                    </button>
                </div>
                <div class="p-5 space-y-3">
                    <label class="block">
                        <span class="block text-xs text-slate-400 mb-1">"Nombre"</span>
                        <input
                            class=campo
                            placeholder="Caries profunda"
                            prop:value=move || nombre.get()
                            on:input=move |e| set_nombre.set(event_target_value(&e))
                        />
                        <span class="block text-xs text-slate-300 font-mono mt-1">
                            {move || clave_desde_nombre(&nombre.get())}
                        </span>
                    </label>
                    <div class="grid grid-cols-2 gap-3">
                        <label class="block">
                            <span class="block text-xs text-slate-400 mb-1">"Color"</span>
                            <input
                                type="color"
                                class="w-full h-10 rounded-lg border border-slate-200 cursor-pointer"
                                prop:value=move || color.get()
                                on:input=move |e| set_color.set(event_target_value(&e))
                            />
                        </label>
                        <label class="block">
                            <span class="block text-xs text-slate-400 mb-1">"Orden"</span>
                            <input
                                type="number"
                                class=campo
                                prop:value=move || orden.get()
                                on:input=move |e| set_orden.set(event_target_value(&e))
                            />
                        </label>
                    </div>
                    <div>
                        <span class="block text-xs text-slate-400 mb-2">"Símbolo"</span>
                        <div class="flex items-center gap-2 flex-wrap">
                            {SIMBOLOS.map(|(clave, etiqueta)| view! {
                                <button
                                    title=etiqueta
                                    class=move || format!(
                                        "rounded-lg border p-1 {}",
                                        if simbolo.get() == clave {
                                            "border-[#5fb3b0] bg-[#5fb3b0]/10"
                                        } else {
                                            "border-slate-200 hover:border-slate-300"
                                        }
                                    )
                                    on:click=move |_| set_simbolo.set(clave.to_string())
                                >
                                    {move || view! {
                                        <SimboloPreview color=color.get() simbolo=Some(clave.to_string()) />
                                    }}
                                </button>
                            }).collect_view()}
                        </div>
                    </div>
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
                        disabled=move || guardando.get()
                        on:click=guardar
                    >
                        {move || if guardando.get() { "Guardando..." } else { "Guardar" }}
                    </button>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clave_normaliza_nombre() {
        assert_eq!(clave_desde_nombre("Caries profunda"), "CARIES_PROFUNDA");
        assert_eq!(clave_desde_nombre("  sano "), "SANO");
        assert_eq!(clave_desde_nombre("a b  c"), "A_B__C");
    }
}
