//! Appointment detail view and the scheduling calendar.

mod calendario;

pub use calendario::CalendarioPage;

use gloo_timers::callback::Timeout;
use leptos::*;
use leptos_router::{use_navigate, use_params_map, A};
use wasm_bindgen::JsCast;

use crate::client::{self, upload_url, Cita};
use crate::components::common::{whatsapp_link, Cargando, EstadoCitaBadge};
use crate::utils::fechas::{formatear_fecha, formatear_fecha_hora};

const ESTADOS: [&str; 4] = ["PENDIENTE", "CONFIRMADA", "FINALIZADA", "CANCELADA"];

#[component]
pub fn CitaDetallePage() -> impl IntoView {
    let params = use_params_map();
    let cita_id = move || params.with(|p| p.get("id").cloned().unwrap_or_default());

    let (cita, set_cita) = create_signal(Option::<Cita>::None);
    let (cargando, set_cargando) = create_signal(true);
    let (error, set_error) = create_signal(Option::<String>::None);
    let (refresco, set_refresco) = create_signal(0u32);
    let (aviso, set_aviso) = create_signal(Option::<String>::None);

    create_effect(move |_| {
        let _ = refresco.get();
        let id = cita_id();
        if id.is_empty() {
            return;
        }
        spawn_local(async move {
            set_cargando.set(true);
            match client::cita_get(&id).await {
                Ok(c) => set_cita.set(Some(c)),
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_cargando.set(false);
        });
    });

    let cambiar_estado = move |nuevo: String| {
        let id = cita_id();
        spawn_local(async move {
            match client::cita_update(&id, &serde_json::json!({ "estado": nuevo })).await {
                Ok(_) => set_refresco.update(|n| *n += 1),
                Err(e) => set_error.set(Some(e.to_string())),
            }
        });
    };

    let enviar_recordatorio = move |_| {
        let id = cita_id();
        spawn_local(async move {
            let texto = match client::cita_enviar_recordatorio(&id).await {
                Ok(r) if r.enviado => "✓ Recordatorio enviado".to_string(),
                Ok(r) => r.mensaje,
                Err(e) => e.to_string(),
            };
            set_aviso.set(Some(texto));
            Timeout::new(4000, move || set_aviso.set(None)).forget();
        });
    };

    view! {
        <div class="space-y-6">
            {move || error.get().map(|e| view! {
                <div class="p-3 bg-red-50 border border-red-200 rounded-lg text-red-600 text-sm">{e}</div>
            })}
            {move || if cargando.get() {
                view! { <Cargando /> }.into_view()
            } else {
                cita.get().map(|c| view! {
                    <CabeceraCita
                        cita=c.clone()
                        aviso=aviso
                        on_estado=cambiar_estado
                        on_recordatorio=enviar_recordatorio
                    />
                    <AccionesCita cita=c.clone() />
                    <div class="grid lg:grid-cols-2 gap-6">
                        <OdontogramasCita cita=c.clone() on_cambio=move |_| set_refresco.update(|n| *n += 1) />
                        <NotasCita cita=c.clone() on_cambio=move |_| set_refresco.update(|n| *n += 1) />
                    </div>
                    <ImagenesCita cita=c on_cambio=move |_| set_refresco.update(|n| *n += 1) />
                }.into_view()).unwrap_or_else(|| view! { <Cargando /> }.into_view())
            }}
        </div>
    }
}

#[component]
fn CabeceraCita(
    cita: Cita,
    aviso: ReadSignal<Option<String>>,
    #[prop(into)] on_estado: Callback<String>,
    #[prop(into)] on_recordatorio: Callback<()>,
) -> impl IntoView {
    let paciente_id = cita.paciente.id.clone();
    let nombre = cita.paciente.nombre_completo();
    let telefono = cita.paciente.telefono.clone();
    let estado_actual = cita.estado.clone();

    view! {
        <div class="rounded-xl shadow overflow-hidden">
            <div class="bg-gradient-to-r from-[#5fb3b0] to-[#4a9a97] px-6 py-5 text-white">
                <div class="flex items-start justify-between gap-4 flex-wrap">
                    <div>
                        <p class="text-sm opacity-80">{formatear_fecha(&cita.fecha)}</p>
                        <h1 class="text-2xl font-bold mt-0.5">
                            {cita.hora_inicio.clone()}" - "{cita.hora_fin.clone()}
                        </h1>
                        <A
                            href=format!("/pacientes/{paciente_id}")
                            class="inline-block mt-1 text-sm underline underline-offset-2 opacity-90 hover:opacity-100"
                        >
                            {nombre}
                        </A>
                    </div>
                    <EstadoCitaBadge estado=cita.estado.clone() />
                </div>
            </div>
            <div class="bg-white px-6 py-4 space-y-3">
                {cita.motivo.clone().map(|m| view! {
                    <p class="text-sm text-slate-600"><span class="text-slate-400">"Motivo: "</span>{m}</p>
                })}
                <div class="flex items-center gap-2 flex-wrap">
                    <span class="text-xs text-slate-400">"Estado:"</span>
                    {ESTADOS.map(|e| {
                        let actual = estado_actual.clone();
                        view! {
                            <button
                                class=move || format!(
                                    "text-xs px-2.5 py-1 rounded-full border {}",
                                    if actual == e {
                                        "border-[#5fb3b0] bg-[#5fb3b0]/10 text-[#5fb3b0] font-medium"
                                    } else {
                                        "border-slate-200 text-slate-500 hover:border-slate-300"
                                    }
                                )
                                on:click=move |_| on_estado.call(e.to_string())
                            >
                                {e}
                            </button>
                        }
                    }).collect_view()}
                    <span class="flex-1"></span>
                    <button
                        class="text-xs px-3 py-1.5 rounded-lg border border-slate-200 text-slate-600 hover:border-[#5fb3b0]"
                        on:click=move |_| on_recordatorio.call(())
                    >
                        "Enviar recordatorio"
                    </button>
                    {telefono.map(|t| view! {
                        <a
                            href=whatsapp_link(&t)
                            target="_blank"
                            class="text-xs px-3 py-1.5 rounded-lg border border-green-200 text-green-600 hover:bg-green-50"
                        >
                            "WhatsApp"
                        </a>
                    })}
                </div>
                {move || aviso.get().map(|a| view! {
                    <p class="text-xs text-slate-500">{a}</p>
                })}
            </div>
        </div>
    }
}

#[component]
fn AccionesCita(cita: Cita) -> impl IntoView {
    let prestaciones = cita
        .registro_prestacion
        .as_ref()
        .map(|r| r.items.len())
        .unwrap_or(0);
    view! {
        <div class="grid grid-cols-2 gap-3">
            <A
                href=format!("/citas/{}/prestaciones", cita.id)
                class="bg-white rounded-xl shadow px-4 py-3 text-center hover:text-[#5fb3b0]"
            >
                <div class="text-sm font-medium text-slate-600">"Registro de prestaciones"</div>
                <div class="text-xs text-slate-400 mt-0.5">{prestaciones}" prestaciones cargadas"</div>
            </A>
            <A
                href=format!("/citas/{}/historia-clinica", cita.id)
                class="bg-white rounded-xl shadow px-4 py-3 text-center hover:text-[#5fb3b0]"
            >
                <div class="text-sm font-medium text-slate-600">"Historia clínica"</div>
                <div class="text-xs text-slate-400 mt-0.5">"Formulario de la consulta"</div>
            </A>
        </div>
    }
}

#[component]
fn OdontogramasCita(cita: Cita, #[prop(into)] on_cambio: Callback<()>) -> impl IntoView {
    let navigate = use_navigate();
    let cita_id = cita.id.clone();
    let paciente_id = cita.paciente.id.clone();
    let (titulo, set_titulo) = create_signal(String::new());
    let (creando, set_creando) = create_signal(false);
    let (error, set_error) = create_signal(Option::<String>::None);

    let crear = move |_| {
        let paciente_id = paciente_id.clone();
        let cita_id = cita_id.clone();
        let navigate = navigate.clone();
        let titulo_valor = titulo.get().trim().to_string();
        set_creando.set(true);
        spawn_local(async move {
            let titulo_opt = (!titulo_valor.is_empty()).then_some(titulo_valor.as_str());
            match client::odontograma_create(&paciente_id, titulo_opt, Some(&cita_id), None).await {
                Ok(od) => {
                    on_cambio.call(());
                    navigate(&format!("/odontograma/{}", od.id), Default::default());
                }
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_creando.set(false);
        });
    };

    view! {
        <div class="bg-white rounded-xl shadow p-4">
            <h2 class="text-sm font-medium text-slate-500 mb-3">"Odontogramas de la cita"</h2>
            {if cita.odontogramas.is_empty() {
                view! { <p class="text-sm text-slate-400 py-2">"Sin odontogramas en esta cita"</p> }.into_view()
            } else {
                cita.odontogramas.iter().map(|od| {
                    let etiqueta = od.titulo.clone().unwrap_or_else(|| "Odontograma".to_string());
                    view! {
                        <A
                            href=format!("/odontograma/{}", od.id)
                            class="flex items-center justify-between px-3 py-2 rounded-lg hover:bg-slate-50 text-sm text-slate-600"
                        >
                            {etiqueta}
                        </A>
                    }
                }).collect_view()
            }}
            <div class="flex items-center gap-2 mt-3">
                <input
                    class="flex-1 px-3 py-2 rounded-lg border border-slate-200 text-sm focus:outline-none focus:border-[#5fb3b0]"
                    placeholder="Título (opcional)"
                    prop:value=move || titulo.get()
                    on:input=move |e| set_titulo.set(event_target_value(&e))
                />
                <button
                    class="px-3 py-2 rounded-lg bg-[#5fb3b0] hover:bg-[#4a9a97] text-white text-sm font-medium disabled:opacity-50"
                    disabled=move || creando.get()
                    on:click=crear
                >
                    "+ Nuevo"
                </button>
            </div>
            {move || error.get().map(|e| view! {
                <div class="p-2 mt-2 bg-red-50 border border-red-200 rounded text-red-600 text-xs">{e}</div>
            })}
        </div>
    }
}

#[component]
fn NotasCita(cita: Cita, #[prop(into)] on_cambio: Callback<()>) -> impl IntoView {
    let cita_id = cita.id.clone();
    let paciente_id = cita.paciente.id.clone();
    let (titulo, set_titulo) = create_signal(String::new());
    let (descripcion, set_descripcion) = create_signal(String::new());
    let (guardando, set_guardando) = create_signal(false);
    let (error, set_error) = create_signal(Option::<String>::None);

    let guardar = move |_| {
        let t = titulo.get().trim().to_string();
        let d = descripcion.get().trim().to_string();
        if t.is_empty() || d.is_empty() {
            return;
        }
        let paciente_id = paciente_id.clone();
        let cita_id = cita_id.clone();
        set_guardando.set(true);
        spawn_local(async move {
            let cuerpo = serde_json::json!({
                "pacienteId": paciente_id,
                "citaId": cita_id,
                "titulo": t,
                "descripcion": d,
                "profesional": "Admin",
            });
            match client::nota_create(&cuerpo).await {
                Ok(_) => {
                    set_titulo.set(String::new());
                    set_descripcion.set(String::new());
                    on_cambio.call(());
                }
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_guardando.set(false);
        });
    };

    let borrar = move |nota_id: String| {
        spawn_local(async move {
            match client::nota_delete(&nota_id).await {
                Ok(()) => on_cambio.call(()),
                Err(e) => set_error.set(Some(e.to_string())),
            }
        });
    };

    view! {
        <div class="bg-white rounded-xl shadow p-4">
            <h2 class="text-sm font-medium text-slate-500 mb-3">"Notas de la cita"</h2>
            {if cita.notas_clinicas.is_empty() {
                view! { <p class="text-sm text-slate-400 py-2">"Sin notas en esta cita"</p> }.into_view()
            } else {
                cita.notas_clinicas.iter().map(|n| {
                    let nota_id = n.id.clone();
                    let borrar = borrar.clone();
                    view! {
                        <div class="px-3 py-2 rounded-lg hover:bg-slate-50">
                            <div class="flex items-start justify-between gap-2">
                                <div>
                                    <p class="text-sm text-slate-700 font-medium">{n.titulo.clone()}</p>
                                    <p class="text-xs text-slate-400">{formatear_fecha_hora(&n.fecha)}</p>
                                </div>
                                <button
                                    class="text-xs text-red-400 hover:text-red-600"
                                    on:click=move |_| borrar(nota_id.clone())
                                >
                                    "Eliminar"
                                </button>
                            </div>
                            <p class="text-sm text-slate-600 mt-1">{n.descripcion.clone()}</p>
                        </div>
                    }
                }).collect_view()
            }}
            <div class="space-y-2 mt-3">
                <input
                    class="w-full px-3 py-2 rounded-lg border border-slate-200 text-sm focus:outline-none focus:border-[#5fb3b0]"
                    placeholder="Título"
                    prop:value=move || titulo.get()
                    on:input=move |e| set_titulo.set(event_target_value(&e))
                />
                <textarea
                    class="w-full px-3 py-2 rounded-lg border border-slate-200 text-sm focus:outline-none focus:border-[#5fb3b0]"
                    rows=2
                    placeholder="Descripción"
                    prop:value=move || descripcion.get()
                    on:input=move |e| set_descripcion.set(event_target_value(&e))
                />
                <button
                    class="w-full py-2 rounded-lg bg-[#5fb3b0] hover:bg-[#4a9a97] text-white text-sm font-medium disabled:opacity-50"
                    disabled=move || guardando.get() || titulo.get().trim().is_empty() || descripcion.get().trim().is_empty()
                    on:click=guardar
                >
                    "Agregar nota"
                </button>
            </div>
            {move || error.get().map(|e| view! {
                <div class="p-2 mt-2 bg-red-50 border border-red-200 rounded text-red-600 text-xs">{e}</div>
            })}
        </div>
    }
}

#[component]
fn ImagenesCita(cita: Cita, #[prop(into)] on_cambio: Callback<()>) -> impl IntoView {
    let cita_id = cita.id.clone();
    let paciente_id = cita.paciente.id.clone();
    let (subiendo, set_subiendo) = create_signal(false);
    let (error, set_error) = create_signal(Option::<String>::None);

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
        let paciente_id = paciente_id.clone();
        let cita_id = cita_id.clone();
        set_subiendo.set(true);
        spawn_local(async move {
            match client::imagen_upload(&paciente_id, &archivo, None, None, Some(&cita_id)).await {
                Ok(_) => on_cambio.call(()),
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_subiendo.set(false);
        });
    };

    let borrar = move |imagen_id: String| {
        spawn_local(async move {
            match client::imagen_delete(&imagen_id).await {
                Ok(()) => on_cambio.call(()),
                Err(e) => set_error.set(Some(e.to_string())),
            }
        });
    };

    view! {
        <div class="bg-white rounded-xl shadow p-4">
            <div class="flex items-center justify-between mb-3">
                <h2 class="text-sm font-medium text-slate-500">"Imágenes de la cita"</h2>
                <label class="text-xs px-3 py-1.5 rounded-lg bg-[#5fb3b0] hover:bg-[#4a9a97] text-white font-medium cursor-pointer">
                    {move || if subiendo.get() { "Subiendo..." } else { "Subir imagen" }}
                    <input type="file" accept="image/*" class="hidden" disabled=move || subiendo.get() on:change=subir />
                </label>
            </div>
            {if cita.imagenes.is_empty() {
                view! { <p class="text-sm text-slate-400 py-2">"Sin imágenes en esta cita"</p> }.into_view()
            } else {
                view! {
                    <div class="grid grid-cols-3 md:grid-cols-6 gap-3">
                        {cita.imagenes.iter().map(|img| {
                            let imagen_id = img.id.clone();
                            let borrar = borrar.clone();
                            view! {
                                <div class="relative group">
                                    <img src=upload_url(&img.url) class="w-full h-24 object-cover rounded-lg" />
                                    <button
                                        class="absolute top-1 right-1 hidden group-hover:block text-xs bg-white/90 rounded px-1.5 py-0.5 text-red-500"
                                        on:click=move |_| borrar(imagen_id.clone())
                                    >
                                        "✕"
                                    </button>
                                </div>
                            }
                        }).collect_view()}
                    </div>
                }.into_view()
            }}
            {move || error.get().map(|e| view! {
                <div class="p-2 mt-2 bg-red-50 border border-red-200 rounded text-red-600 text-xs">{e}</div>
            })}
        </div>
    }
}
