//! Registro de prestaciones: per-cita treatment log with billing codes.

use chrono::{Duration, Local};
use leptos::*;
use leptos_router::{use_params_map, A};

use crate::client::{self, Cita, PrestacionItem, RegistroPrestacion};
use crate::components::common::{Cargando, EstadoCitaBadge};
use crate::utils::fechas::formatear_fecha;

const CARAS: [&str; 5] = ["VESTIBULAR", "LINGUAL", "MESIAL", "DISTAL", "OCLUSAL"];

/// Recent and upcoming citas, entry points into the per-cita registro.
#[component]
pub fn PrestacionesListPage() -> impl IntoView {
    let (citas, set_citas) = create_signal(Vec::<Cita>::new());
    let (cargando, set_cargando) = create_signal(true);
    let (error, set_error) = create_signal(Option::<String>::None);

    create_effect(move |_| {
        let hoy = Local::now().date_naive();
        let desde = (hoy - Duration::days(7)).format("%Y-%m-%d").to_string();
        let hasta = (hoy + Duration::days(30)).format("%Y-%m-%d").to_string();
        spawn_local(async move {
            set_cargando.set(true);
            match client::citas_list(Some(&desde), Some(&hasta), None).await {
                Ok(mut lista) => {
                    lista.sort_by(|a, b| (&a.fecha, &a.hora_inicio).cmp(&(&b.fecha, &b.hora_inicio)));
                    set_citas.set(lista);
                }
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_cargando.set(false);
        });
    });

    view! {
        <div class="space-y-6">
            <div>
                <h1 class="text-xl font-bold text-slate-800">"Registro de prestaciones"</h1>
                <p class="text-sm text-slate-400 mt-0.5">"Citas de la última semana y el próximo mes"</p>
            </div>

            {move || error.get().map(|e| view! {
                <div class="p-3 bg-red-50 border border-red-200 rounded-lg text-red-600 text-sm">{e}</div>
            })}

            {move || if cargando.get() {
                view! { <Cargando /> }.into_view()
            } else {
                let lista = citas.get();
                if lista.is_empty() {
                    view! {
                        <p class="text-sm text-slate-400 text-center py-8">"Sin citas en el período"</p>
                    }.into_view()
                } else {
                    view! {
                        <div class="bg-white rounded-xl shadow overflow-hidden">
                            <table class="w-full text-sm">
                                <thead>
                                    <tr class="border-b border-slate-100 text-left text-xs text-slate-400 uppercase tracking-wide">
                                        <th class="px-4 py-3">"Fecha"</th>
                                        <th class="px-4 py-3">"Paciente"</th>
                                        <th class="px-4 py-3">"Estado"</th>
                                        <th class="px-4 py-3">"Prestaciones"</th>
                                        <th class="px-4 py-3 text-right"></th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {lista.into_iter().map(|c| {
                                        let cargadas = c.registro_prestacion.as_ref().map(|r| r.items.len()).unwrap_or(0);
                                        view! {
                                            <tr class="border-b border-slate-50 hover:bg-slate-50">
                                                <td class="px-4 py-3 text-slate-600">
                                                    {format!("{} {}", formatear_fecha(&c.fecha), c.hora_inicio)}
                                                </td>
                                                <td class="px-4 py-3">
                                                    <A href=format!("/pacientes/{}", c.paciente.id) class="text-slate-700 hover:text-[#5fb3b0]">
                                                        {c.paciente.nombre_completo()}
                                                    </A>
                                                </td>
                                                <td class="px-4 py-3"><EstadoCitaBadge estado=c.estado.clone() /></td>
                                                <td class="px-4 py-3 text-slate-500">{cargadas}</td>
                                                <td class="px-4 py-3 text-right">
                                                    <A
                                                        href=format!("/citas/{}/prestaciones", c.id)
                                                        class="text-xs px-3 py-1.5 rounded-lg bg-[#5fb3b0] hover:bg-[#4a9a97] text-white font-medium"
                                                    >
                                                        "Abrir registro"
                                                    </A>
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
        </div>
    }
}

#[component]
pub fn RegistroPrestacionesPage() -> impl IntoView {
    let params = use_params_map();
    let cita_id = move || params.with(|p| p.get("id").cloned().unwrap_or_default());

    let (cita, set_cita) = create_signal(Option::<Cita>::None);
    let (registro, set_registro) = create_signal(Option::<RegistroPrestacion>::None);
    let (cargando, set_cargando) = create_signal(true);
    let (error, set_error) = create_signal(Option::<String>::None);
    let (refresco, set_refresco) = create_signal(0u32);

    create_effect(move |_| {
        let _ = refresco.get();
        let id = cita_id();
        if id.is_empty() {
            return;
        }
        spawn_local(async move {
            set_cargando.set(true);
            match client::prestaciones_por_cita(&id).await {
                Ok(r) => {
                    set_cita.set(Some(r.cita));
                    match r.registro {
                        Some(reg) => set_registro.set(Some(reg)),
                        // first visit for this cita, open the registro on demand
                        None => match client::registro_prestacion_create(&id).await {
                            Ok(reg) => set_registro.set(Some(reg)),
                            Err(e) => set_error.set(Some(e.to_string())),
                        },
                    }
                }
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_cargando.set(false);
        });
    });

    let actualizar_registro = move |datos: serde_json::Value| {
        let id = match registro.get_untracked() {
            Some(r) => r.id,
            None => return,
        };
        spawn_local(async move {
            match client::registro_prestacion_update(&id, &datos).await {
                Ok(r) => set_registro.set(Some(r)),
                Err(e) => set_error.set(Some(e.to_string())),
            }
        });
    };

    view! {
        <div class="space-y-6">
            <div class="flex items-center gap-3">
                <A href=move || format!("/citas/{}", cita_id()) class="text-sm text-[#5fb3b0] hover:underline">
                    "← Volver a la cita"
                </A>
                <h1 class="text-xl font-bold text-slate-800">"Registro de prestaciones"</h1>
            </div>

            {move || error.get().map(|e| view! {
                <div class="p-3 bg-red-50 border border-red-200 rounded-lg text-red-600 text-sm">{e}</div>
            })}

            {move || cita.get().map(|c| view! {
                <div class="bg-white rounded-xl shadow px-4 py-3 flex items-center gap-3 flex-wrap text-sm">
                    <span class="text-slate-600">{formatear_fecha(&c.fecha)}" · "{c.hora_inicio.clone()}</span>
                    <A href=format!("/pacientes/{}", c.paciente.id) class="text-[#5fb3b0] hover:underline">
                        {c.paciente.nombre_completo()}
                    </A>
                    <EstadoCitaBadge estado=c.estado.clone() />
                </div>
            })}

            {move || if cargando.get() {
                view! { <Cargando /> }.into_view()
            } else {
                registro.get().map(|reg| view! {
                    <CasillasRegistro registro=reg.clone() on_cambiar=actualizar_registro />
                    <TablaItems
                        registro=reg.clone()
                        on_cambio=move |_| set_refresco.update(|n| *n += 1)
                    />
                    <ObservacionesRegistro registro=reg on_cambiar=actualizar_registro />
                }.into_view()).unwrap_or_else(|| ().into_view())
            }}
        </div>
    }
}

#[component]
fn CasillasRegistro(
    registro: RegistroPrestacion,
    #[prop(into)] on_cambiar: Callback<serde_json::Value>,
) -> impl IntoView {
    let casillas = [
        ("Prótesis fija", "protesisFija", registro.protesis_fija),
        ("Prótesis removible", "protesisRemovible", registro.protesis_removible),
        ("Coronas", "coronas", registro.coronas),
        ("Consentimiento informado", "consentimientoInformado", registro.consentimiento_informado),
    ];
    let (dientes, set_dientes) = create_signal(
        registro
            .cantidad_dientes_existente
            .map(|n| n.to_string())
            .unwrap_or_default(),
    );

    view! {
        <div class="bg-white rounded-xl shadow p-4">
            <div class="flex items-center gap-6 flex-wrap">
                {casillas.map(|(label, campo, valor)| view! {
                    <label class="flex items-center gap-2 text-sm text-slate-600 cursor-pointer">
                        <input
                            type="checkbox"
                            class="accent-[#5fb3b0]"
                            prop:checked=valor
                            on:change=move |e| {
                                on_cambiar.call(serde_json::json!({ campo: event_target_checked(&e) }));
                            }
                        />
                        {label}
                    </label>
                }).collect_view()}
                <label class="flex items-center gap-2 text-sm text-slate-600">
                    "Dientes existentes:"
                    <input
                        type="number"
                        class="w-20 px-2 py-1 rounded-lg border border-slate-200 text-sm focus:outline-none focus:border-[#5fb3b0]"
                        prop:value=move || dientes.get()
                        on:input=move |e| set_dientes.set(event_target_value(&e))
                        on:blur=move |_| {
                            let valor = dientes.get_untracked();
                            let cantidad = valor.trim().parse::<u32>().ok();
                            on_cambiar.call(serde_json::json!({ "cantidadDientesExistente": cantidad }));
                        }
                    />
                </label>
            </div>
        </div>
    }
}

#[component]
fn TablaItems(registro: RegistroPrestacion, #[prop(into)] on_cambio: Callback<()>) -> impl IntoView {
    let registro_id = registro.id.clone();
    let (error, set_error) = create_signal(Option::<String>::None);

    let hoy = Local::now().date_naive().format("%Y-%m-%d").to_string();
    let (numero, set_numero) = create_signal(String::new());
    let (cara, set_cara) = create_signal(String::new());
    let (codigo, set_codigo) = create_signal(String::new());
    let (fecha, set_fecha) = create_signal(hoy);
    let (cantidad, set_cantidad) = create_signal("1".to_string());
    let (guardando, set_guardando) = create_signal(false);

    let agregar = move |_| {
        let n = match numero.get().trim().parse::<u8>() {
            Ok(n) if (11..=85).contains(&n) => n,
            _ => {
                set_error.set(Some("Número de diente inválido (11 a 85)".to_string()));
                return;
            }
        };
        let cod = codigo.get().trim().to_string();
        if cod.is_empty() {
            set_error.set(Some("Falta el código de la prestación".to_string()));
            return;
        }
        let registro_id = registro_id.clone();
        let c = cara.get();
        let f = fecha.get().trim().to_string();
        let cant = cantidad.get().trim().parse::<u32>().unwrap_or(1).max(1);
        set_guardando.set(true);
        set_error.set(None);
        spawn_local(async move {
            let cuerpo = serde_json::json!({
                "numeroDiente": n,
                "cara": if c.is_empty() { serde_json::Value::Null } else { serde_json::Value::String(c) },
                "codigo": cod,
                "fechaRealizacion": if f.is_empty() { serde_json::Value::Null } else { serde_json::Value::String(f) },
                "cantidad": cant,
            });
            match client::prestacion_item_add(&registro_id, &cuerpo).await {
                Ok(_) => {
                    set_numero.set(String::new());
                    set_cara.set(String::new());
                    set_codigo.set(String::new());
                    set_fecha.set(Local::now().date_naive().format("%Y-%m-%d").to_string());
                    set_cantidad.set("1".to_string());
                    on_cambio.call(());
                }
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_guardando.set(false);
        });
    };

    let borrar = move |item_id: String| {
        spawn_local(async move {
            match client::prestacion_item_delete(&item_id).await {
                Ok(()) => on_cambio.call(()),
                Err(e) => set_error.set(Some(e.to_string())),
            }
        });
    };

    let campo = "px-2 py-1.5 rounded-lg border border-slate-200 text-sm focus:outline-none focus:border-[#5fb3b0]";

    view! {
        <div class="bg-white rounded-xl shadow overflow-hidden">
            <table class="w-full text-sm">
                <thead>
                    <tr class="border-b border-slate-100 text-left text-xs text-slate-400 uppercase tracking-wide">
                        <th class="px-4 py-3">"Diente"</th>
                        <th class="px-4 py-3">"Cara"</th>
                        <th class="px-4 py-3">"Código"</th>
                        <th class="px-4 py-3">"Fecha realización"</th>
                        <th class="px-4 py-3">"Cant."</th>
                        <th class="px-4 py-3">"Conformidad"</th>
                        <th class="px-4 py-3 text-right"></th>
                    </tr>
                </thead>
                <tbody>
                    {registro.items.iter().map(|item| {
                        let item = item.clone();
                        let borrar = borrar.clone();
                        view! {
                            <FilaItem item=item on_cambio=on_cambio on_borrar=move |id| borrar(id) />
                        }
                    }).collect_view()}
                    <tr class="border-t border-slate-100 bg-slate-50/50">
                        <td class="px-4 py-2">
                            <input
                                class=format!("w-16 {campo}")
                                placeholder="11"
                                prop:value=move || numero.get()
                                on:input=move |e| set_numero.set(event_target_value(&e))
                            />
                        </td>
                        <td class="px-4 py-2">
                            <select class=campo on:change=move |e| set_cara.set(event_target_value(&e))>
                                <option value="">"-"</option>
                                {CARAS.map(|c| view! { <option value=c>{c}</option> }).collect_view()}
                            </select>
                        </td>
                        <td class="px-4 py-2">
                            <input
                                class=format!("w-24 {campo}")
                                placeholder="Código"
                                prop:value=move || codigo.get()
                                on:input=move |e| set_codigo.set(event_target_value(&e))
                            />
                        </td>
                        <td class="px-4 py-2">
                            <input
                                type="date"
                                class=campo
                                prop:value=move || fecha.get()
                                on:input=move |e| set_fecha.set(event_target_value(&e))
                            />
                        </td>
                        <td class="px-4 py-2">
                            <input
                                type="number"
                                min="1"
                                class=format!("w-14 {campo}")
                                prop:value=move || cantidad.get()
                                on:input=move |e| set_cantidad.set(event_target_value(&e))
                            />
                        </td>
                        <td class="px-4 py-2"></td>
                        <td class="px-4 py-2 text-right">
                            <button
                                class="text-xs px-3 py-1.5 rounded-lg bg-[#5fb3b0] hover:bg-[#4a9a97] text-white font-medium disabled:opacity-50"
                                disabled=move || guardando.get()
                                on:click=agregar
                            >
                                "Agregar"
                            </button>
                        </td>
                    </tr>
                </tbody>
            </table>
            {move || error.get().map(|e| view! {
                <div class="p-3 border-t border-red-100 bg-red-50 text-red-600 text-xs">{e}</div>
            })}
        </div>
    }
}

#[component]
fn FilaItem(
    item: PrestacionItem,
    #[prop(into)] on_cambio: Callback<()>,
    #[prop(into)] on_borrar: Callback<String>,
) -> impl IntoView {
    let item_id = item.id.clone();
    let id_borrar = item.id.clone();
    let id_conformidad = item.id.clone();
    let (editando, set_editando) = create_signal(false);
    let (codigo, set_codigo) = create_signal(item.codigo.clone());
    // date inputs want the plain YYYY-MM-DD prefix of the stored timestamp
    let (fecha, set_fecha) = create_signal(
        item.fecha_realizacion
            .as_deref()
            .map(|f| f.chars().take(10).collect::<String>())
            .unwrap_or_default(),
    );
    let cara = item.cara.clone().unwrap_or_else(|| "-".to_string());

    let cambiar_conformidad = move |marcada: bool| {
        let id = id_conformidad.clone();
        spawn_local(async move {
            let cuerpo = serde_json::json!({ "conformidadPaciente": marcada });
            if client::prestacion_item_update(&id, &cuerpo).await.is_ok() {
                on_cambio.call(());
            }
        });
    };

    let guardar = move |_| {
        let item_id = item_id.clone();
        let cod = codigo.get().trim().to_string();
        if cod.is_empty() {
            return;
        }
        let f = fecha.get().trim().to_string();
        spawn_local(async move {
            let cuerpo = serde_json::json!({
                "codigo": cod,
                "fechaRealizacion": if f.is_empty() { serde_json::Value::Null } else { serde_json::Value::String(f) },
            });
            match client::prestacion_item_update(&item_id, &cuerpo).await {
                Ok(_) => {
                    set_editando.set(false);
                    on_cambio.call(());
                }
                Err(_) => set_editando.set(false),
            }
        });
    };

    let campo = "px-2 py-1 rounded border border-slate-200 text-sm focus:outline-none focus:border-[#5fb3b0]";

    view! {
        <tr class="border-b border-slate-50 hover:bg-slate-50">
            <td class="px-4 py-2.5 text-slate-700 font-mono">{item.numero_diente}</td>
            <td class="px-4 py-2.5 text-slate-500">{cara}</td>
            <td class="px-4 py-2.5">
                {move || if editando.get() {
                    view! {
                        <input
                            class=format!("w-24 {campo}")
                            prop:value=move || codigo.get()
                            on:input=move |e| set_codigo.set(event_target_value(&e))
                        />
                    }.into_view()
                } else {
                    view! { <span class="text-slate-700">{codigo.get()}</span> }.into_view()
                }}
            </td>
            <td class="px-4 py-2.5">
                {move || if editando.get() {
                    view! {
                        <input
                            type="date"
                            class=campo
                            prop:value=move || fecha.get()
                            on:input=move |e| set_fecha.set(event_target_value(&e))
                        />
                    }.into_view()
                } else {
                    view! {
                        <span class="text-slate-500">
                            {move || {
                                let f = fecha.get();
                                if f.is_empty() { "-".to_string() } else { formatear_fecha(&f) }
                            }}
                        </span>
                    }.into_view()
                }}
            </td>
            <td class="px-4 py-2.5 text-slate-500">{item.cantidad}</td>
            <td class="px-4 py-2.5">
                <input
                    type="checkbox"
                    class="accent-[#5fb3b0]"
                    prop:checked=item.conformidad_paciente
                    on:change=move |e| cambiar_conformidad(event_target_checked(&e))
                />
            </td>
            <td class="px-4 py-2.5 text-right space-x-3">
                {move || if editando.get() {
                    let guardar = guardar.clone();
                    view! {
                        <button class="text-xs text-[#5fb3b0] hover:underline" on:click=guardar>
                            "Guardar"
                        </button>
                    }.into_view()
                } else {
                    view! {
                        <button class="text-xs text-slate-500 hover:text-[#5fb3b0]" on:click=move |_| set_editando.set(true)>
                            "Editar"
                        </button>
                    }.into_view()
                }}
                <button
                    class="text-xs text-red-400 hover:text-red-600"
                    on:click=move |_| on_borrar.call(id_borrar.clone())
                >
                    "Eliminar"
                </button>
            </td>
        </tr>
    }
}

#[component]
fn ObservacionesRegistro(
    registro: RegistroPrestacion,
    #[prop(into)] on_cambiar: Callback<serde_json::Value>,
) -> impl IntoView {
    let (texto, set_texto) = create_signal(registro.observaciones.unwrap_or_default());

    view! {
        <div class="bg-white rounded-xl shadow p-4">
            <h2 class="text-sm font-medium text-slate-500 mb-2">"Observaciones"</h2>
            <textarea
                class="w-full px-3 py-2 rounded-lg border border-slate-200 text-sm focus:outline-none focus:border-[#5fb3b0]"
                rows=3
                prop:value=move || texto.get()
                on:input=move |e| set_texto.set(event_target_value(&e))
                on:blur=move |_| on_cambiar.call(serde_json::json!({ "observaciones": texto.get_untracked() }))
            ></textarea>
        </div>
    }
}
