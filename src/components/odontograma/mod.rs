//! Interactive odontogram editor over the configurable estado palette.

use std::collections::HashMap;

use leptos::*;
use leptos_router::{use_navigate, use_params_map, A};

use crate::client::{self, ApiError, Diente, EstadoDiente, Odontograma};
use crate::components::common::Cargando;
use crate::utils::fechas::formatear_fecha;
use crate::utils::odontograma::{numeros_desde_cantidad, organizar_en_cuadrantes};

const LADO: u32 = 36;

fn color_de_estado(estados: &[EstadoDiente], clave: &str) -> String {
    estados
        .iter()
        .find(|e| e.clave == clave)
        .map(|e| e.color.clone())
        .unwrap_or_else(|| "#ffffff".to_string())
}

fn simbolo_de_estado(estados: &[EstadoDiente], clave: &str) -> Option<String> {
    estados
        .iter()
        .find(|e| e.clave == clave)
        .and_then(|e| e.simbolo.clone())
        .filter(|s| s != "NINGUNO")
}

#[component]
pub fn OdontogramaPage() -> impl IntoView {
    let params = use_params_map();
    let navigate = use_navigate();
    let odontograma_id = move || params.with(|p| p.get("id").cloned().unwrap_or_default());

    let (odontograma, set_odontograma) = create_signal(Option::<Odontograma>::None);
    let (estados, set_estados) = create_signal(Vec::<EstadoDiente>::new());
    let (cargando, set_cargando) = create_signal(true);
    let (error, set_error) = create_signal(Option::<String>::None);
    let (refresco, set_refresco) = create_signal(0u32);
    let (seleccion, set_seleccion) = create_signal(Option::<u8>::None);

    create_effect(move |_| {
        spawn_local(async move {
            if let Ok(lista) = client::estados_diente_list().await {
                set_estados.set(lista);
            }
        });
    });

    create_effect(move |_| {
        let _ = refresco.get();
        let id = odontograma_id();
        if id.is_empty() {
            return;
        }
        spawn_local(async move {
            set_cargando.set(true);
            match client::odontograma_get(&id).await {
                Ok(od) => {
                    if od.dientes.is_empty() {
                        // freshly created chart, materialize its teeth first
                        if client::odontograma_init_dientes(&id).await.is_ok() {
                            if let Ok(con_dientes) = client::odontograma_get(&id).await {
                                set_odontograma.set(Some(con_dientes));
                            }
                        } else {
                            set_odontograma.set(Some(od));
                        }
                    } else {
                        set_odontograma.set(Some(od));
                    }
                }
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_cargando.set(false);
        });
    });

    let marcar_diente = move |numero: u8| {
        let od = match odontograma.get_untracked() {
            Some(od) => od,
            None => return,
        };
        let ya_existe = od.dientes.iter().any(|d| d.numero_diente == numero);
        if ya_existe {
            set_seleccion.set(Some(numero));
            return;
        }
        let id = od.id.clone();
        spawn_local(async move {
            match client::diente_create(&id, numero, "SANO").await {
                Ok(_) => {
                    set_refresco.update(|n| *n += 1);
                    set_seleccion.set(Some(numero));
                }
                // another tab may have created it already, reload and retry via modal
                Err(ApiError::Servidor(_)) => set_refresco.update(|n| *n += 1),
                Err(e) => set_error.set(Some(e.to_string())),
            }
        });
    };

    let cambiar_cantidad = move |cantidad: usize| {
        let id = odontograma_id();
        let numeros = numeros_desde_cantidad(cantidad);
        spawn_local(async move {
            match client::odontograma_update(&id, &serde_json::json!({ "numerosDientes": numeros })).await {
                Ok(_) => set_refresco.update(|n| *n += 1),
                Err(e) => set_error.set(Some(e.to_string())),
            }
        });
    };

    let guardar_observaciones = move |texto: String| {
        let id = odontograma_id();
        spawn_local(async move {
            if let Err(e) =
                client::odontograma_update(&id, &serde_json::json!({ "observaciones": texto })).await
            {
                set_error.set(Some(e.to_string()));
            }
        });
    };

    let borrar = {
        let navigate = navigate.clone();
        move |_| {
            let confirmado = window()
                .confirm_with_message("¿Eliminar este odontograma y todos sus dientes?")
                .unwrap_or(false);
            if !confirmado {
                return;
            }
            let id = odontograma_id();
            let paciente = odontograma
                .get_untracked()
                .and_then(|od| od.paciente.map(|p| p.id));
            let navigate = navigate.clone();
            spawn_local(async move {
                match client::odontograma_delete(&id).await {
                    Ok(()) => {
                        let destino = paciente
                            .map(|p| format!("/pacientes/{p}"))
                            .unwrap_or_else(|| "/pacientes".to_string());
                        navigate(&destino, Default::default());
                    }
                    Err(e) => set_error.set(Some(e.to_string())),
                }
            });
        }
    };

    view! {
        <div class="space-y-6">
            {move || error.get().map(|e| view! {
                <div class="p-3 bg-red-50 border border-red-200 rounded-lg text-red-600 text-sm">{e}</div>
            })}
            {move || if cargando.get() && odontograma.with(|o| o.is_none()) {
                view! { <Cargando /> }.into_view()
            } else {
                odontograma.get().map(|od| {
                    let titulo = od.titulo.clone().unwrap_or_else(|| "Odontograma".to_string());
                    let fecha = od.fecha.as_deref().map(formatear_fecha).unwrap_or_default();
                    let paciente = od.paciente.clone();
                    let cantidad_actual = od
                        .numeros_dientes
                        .as_ref()
                        .map(|n| n.len())
                        .unwrap_or(32);
                    let observaciones = od.observaciones.clone().unwrap_or_default();
                    let borrar = borrar.clone();
                    view! {
                        <div class="flex items-start justify-between gap-4 flex-wrap">
                            <div>
                                <h1 class="text-xl font-bold text-slate-800">{titulo}</h1>
                                <p class="text-sm text-slate-400 mt-0.5">
                                    {fecha}
                                    {paciente.as_ref().map(|p| format!(" · {}", p.nombre_completo())).unwrap_or_default()}
                                </p>
                                {paciente.as_ref().map(|p| view! {
                                    <A href=format!("/pacientes/{}", p.id) class="text-sm text-[#5fb3b0] hover:underline">
                                        "← Volver a la ficha"
                                    </A>
                                })}
                            </div>
                            <div class="flex items-center gap-2">
                                <span class="text-xs text-slate-400">"Dientes:"</span>
                                {[8usize, 16, 32, 52].map(|n| view! {
                                    <button
                                        class=format!(
                                            "text-xs px-2 py-1 rounded border {}",
                                            if cantidad_actual == n {
                                                "border-[#5fb3b0] bg-[#5fb3b0]/10 text-[#5fb3b0] font-medium"
                                            } else {
                                                "border-slate-200 text-slate-500 hover:border-slate-300"
                                            }
                                        )
                                        on:click=move |_| cambiar_cantidad(n)
                                    >
                                        {n}
                                    </button>
                                }).collect_view()}
                                <button
                                    class="text-xs px-3 py-1.5 rounded-lg border border-red-200 text-red-500 hover:bg-red-50 ml-2"
                                    on:click=borrar
                                >
                                    "Eliminar"
                                </button>
                            </div>
                        </div>

                        <GrillaDientes
                            odontograma=od.clone()
                            estados=estados
                            on_diente=marcar_diente
                        />

                        <div class="grid lg:grid-cols-2 gap-6">
                            <CardObservaciones
                                inicial=observaciones
                                on_guardar=guardar_observaciones
                            />
                            <Referencias estados=estados />
                        </div>
                    }.into_view()
                }).unwrap_or_else(|| view! { <Cargando /> }.into_view())
            }}

            {move || seleccion.get().and_then(|numero| {
                let od = odontograma.get()?;
                let diente = od.dientes.iter().find(|d| d.numero_diente == numero)?.clone();
                Some(view! {
                    <ModalDiente
                        diente=diente
                        estados=estados.get()
                        on_cerrar=move |_| set_seleccion.set(None)
                        on_cambio=move |_| set_refresco.update(|n| *n += 1)
                    />
                })
            })}
        </div>
    }
}

#[component]
fn GrillaDientes(
    odontograma: Odontograma,
    estados: ReadSignal<Vec<EstadoDiente>>,
    #[prop(into)] on_diente: Callback<u8>,
) -> impl IntoView {
    let numeros = odontograma.numeros_dientes.clone().unwrap_or_default();
    let filas = organizar_en_cuadrantes(&numeros);
    let por_numero: HashMap<u8, Diente> = odontograma
        .dientes
        .iter()
        .map(|d| (d.numero_diente, d.clone()))
        .collect();

    view! {
        <div class="bg-white rounded-xl shadow p-6 overflow-x-auto">
            <div class="space-y-5 min-w-max mx-auto">
                {filas.into_iter().map(|fila| {
                    let por_numero = por_numero.clone();
                    view! {
                        <div>
                            <div class="text-xs text-slate-400 mb-1.5">{fila.label}</div>
                            <div class="flex items-center gap-4">
                                <div class="flex gap-1">
                                    {fila.izq.iter().map(|n| view! {
                                        <DienteCelda
                                            numero=*n
                                            diente=por_numero.get(n).cloned()
                                            estados=estados
                                            on_click=on_diente
                                        />
                                    }).collect_view()}
                                </div>
                                <div class="w-px self-stretch bg-slate-200"></div>
                                <div class="flex gap-1">
                                    {fila.der.iter().map(|n| view! {
                                        <DienteCelda
                                            numero=*n
                                            diente=por_numero.get(n).cloned()
                                            estados=estados
                                            on_click=on_diente
                                        />
                                    }).collect_view()}
                                </div>
                            </div>
                        </div>
                    }
                }).collect_view()}
            </div>
        </div>
    }
}

#[component]
fn DienteCelda(
    numero: u8,
    diente: Option<Diente>,
    estados: ReadSignal<Vec<EstadoDiente>>,
    #[prop(into)] on_click: Callback<u8>,
) -> impl IntoView {
    let clave = diente.as_ref().map(|d| d.estado.clone());
    let tiene_nota = diente
        .as_ref()
        .and_then(|d| d.observaciones.as_ref())
        .map(|o| !o.is_empty())
        .unwrap_or(false);
    let ausente = clave.as_deref() == Some("AUSENTE");

    let relleno = move || match &clave {
        Some(c) if c == "AUSENTE" => "#f1f5f9".to_string(),
        Some(c) => estados.with(|e| color_de_estado(e, c)),
        None => "#f8fafc".to_string(),
    };
    let clave_simbolo = diente.as_ref().map(|d| d.estado.clone());
    let simbolo = move || {
        clave_simbolo
            .as_ref()
            .and_then(|c| estados.with(|e| simbolo_de_estado(e, c)))
    };

    view! {
        <button
            class="flex flex-col items-center gap-0.5 group"
            on:click=move |_| on_click.call(numero)
        >
            <svg
                width=LADO
                height=LADO
                viewBox=format!("0 0 {LADO} {LADO}")
                class="group-hover:scale-110 transition-transform"
            >
                <rect
                    x=1
                    y=1
                    width={LADO - 2}
                    height={LADO - 2}
                    rx=6
                    fill=relleno
                    stroke="#cbd5e1"
                    stroke-width=1
                />
                {move || simbolo().map(|s| simbolo_svg(&s))}
                {ausente.then(|| view! {
                    <line x1=8 y1=8 x2={LADO - 8} y2={LADO - 8} stroke="#94a3b8" stroke-width=2 stroke-linecap="round" />
                    <line x1={LADO - 8} y1=8 x2=8 y2={LADO - 8} stroke="#94a3b8" stroke-width=2 stroke-linecap="round" />
                })}
                {tiene_nota.then(|| view! {
                    <circle cx={LADO - 6} cy=6 r=3 fill="#f59e0b" />
                })}
            </svg>
            <span class="text-[10px] text-slate-400">{numero}</span>
        </button>
    }
}

/// Overlay drawn on the tooth for estados with a configured símbolo.
fn simbolo_svg(simbolo: &str) -> View {
    match simbolo {
        "X" => view! {
            <line x1=10 y1=10 x2=26 y2=26 stroke="#1e293b" stroke-width=2 stroke-linecap="round" />
            <line x1=26 y1=10 x2=10 y2=26 stroke="#1e293b" stroke-width=2 stroke-linecap="round" />
        }
        .into_view(),
        "ARCO" => view! {
            <path d="M 8 24 Q 18 8 28 24" fill="none" stroke="#1e293b" stroke-width=2 stroke-linecap="round" />
        }
        .into_view(),
        "RECTANGULO" => view! {
            <rect x=9 y=12 width=18 height=12 fill="none" stroke="#1e293b" stroke-width=2 />
        }
        .into_view(),
        "CIRCULO" => view! {
            <circle cx=18 cy=18 r=8 fill="none" stroke="#1e293b" stroke-width=2 />
        }
        .into_view(),
        "PUNTO" => view! { <circle cx=18 cy=18 r=4 fill="#1e293b" /> }.into_view(),
        _ => ().into_view(),
    }
}

#[component]
fn CardObservaciones(inicial: String, #[prop(into)] on_guardar: Callback<String>) -> impl IntoView {
    let (texto, set_texto) = create_signal(inicial);

    view! {
        <div class="bg-white rounded-xl shadow p-4">
            <h2 class="text-sm font-medium text-slate-500 mb-2">"Observaciones"</h2>
            <textarea
                class="w-full px-3 py-2 rounded-lg border border-slate-200 text-sm focus:outline-none focus:border-[#5fb3b0]"
                rows=4
                placeholder="Observaciones generales del odontograma..."
                prop:value=move || texto.get()
                on:input=move |e| set_texto.set(event_target_value(&e))
                on:blur=move |_| on_guardar.call(texto.get_untracked())
            ></textarea>
        </div>
    }
}

#[component]
fn Referencias(estados: ReadSignal<Vec<EstadoDiente>>) -> impl IntoView {
    view! {
        <div class="bg-white rounded-xl shadow p-4">
            <h2 class="text-sm font-medium text-slate-500 mb-2">"Referencias"</h2>
            <div class="grid grid-cols-2 gap-2">
                {move || {
                    let mut lista = estados.get();
                    lista.sort_by_key(|e| e.orden);
                    lista.into_iter().map(|e| view! {
                        <div class="flex items-center gap-2 text-sm text-slate-600">
                            <span
                                class="w-4 h-4 rounded border border-slate-200 shrink-0"
                                style=format!("background-color: {}", e.color)
                            ></span>
                            {e.nombre.clone()}
                        </div>
                    }).collect_view()
                }}
            </div>
        </div>
    }
}

#[component]
fn ModalDiente(
    diente: Diente,
    estados: Vec<EstadoDiente>,
    #[prop(into)] on_cerrar: Callback<()>,
    #[prop(into)] on_cambio: Callback<()>,
) -> impl IntoView {
    let diente_id = diente.id.clone();
    let numero = diente.numero_diente;
    let (estado_actual, set_estado_actual) = create_signal(diente.estado.clone());
    let (nota, set_nota) = create_signal(diente.observaciones.clone().unwrap_or_default());
    let (error, set_error) = create_signal(Option::<String>::None);

    let elegir_estado = {
        let diente_id = diente_id.clone();
        move |clave: String| {
            let diente_id = diente_id.clone();
            set_estado_actual.set(clave.clone());
            spawn_local(async move {
                match client::diente_update(&diente_id, &serde_json::json!({ "estado": clave })).await {
                    Ok(_) => on_cambio.call(()),
                    Err(e) => set_error.set(Some(e.to_string())),
                }
            });
        }
    };

    let guardar_nota = {
        let diente_id = diente_id.clone();
        move |_| {
            let diente_id = diente_id.clone();
            let texto = nota.get_untracked();
            spawn_local(async move {
                match client::diente_update(&diente_id, &serde_json::json!({ "observaciones": texto })).await
                {
                    Ok(_) => on_cambio.call(()),
                    Err(e) => set_error.set(Some(e.to_string())),
                }
            });
        }
    };

    let mut paleta = estados;
    paleta.sort_by_key(|e| e.orden);

    view! {
        <div class="fixed inset-0 bg-black/40 z-40 flex items-center justify-center p-4">
            <div class="bg-white rounded-xl shadow-xl w-full max-w-md">
                <div class="px-5 py-4 border-b border-slate-100 flex items-center justify-between">
                    <h2 class="font-semibold text-slate-800">{format!("Diente {numero}")}</h2>
                    <button class="text-slate-400 hover:text-slate-600" on:click=move |_| on_cerrar.call(())>
                        "✕"
                    </button>
                </div>
                <div class="p-5 space-y-4">
                    <div>
                        <div class="text-xs text-slate-400 mb-2">"Estado"</div>
                        <div class="grid grid-cols-2 gap-2">
                            {paleta.into_iter().map(|e| {
                                let clave = e.clave.clone();
                                let clave_sel = e.clave.clone();
                                let color = e.color.clone();
                                let nombre = e.nombre.clone();
                                let elegir = elegir_estado.clone();
                                view! {
                                    <button
                                        class=move || format!(
                                            "flex items-center gap-2 px-3 py-2 rounded-lg border text-sm text-left {}",
                                            if estado_actual.get() == clave_sel {
                                                "border-[#5fb3b0] bg-[#5fb3b0]/10"
                                            } else {
                                                "border-slate-200 hover:border-slate-300"
                                            }
                                        )
                                        on:click=move |_| elegir(clave.clone())
                                    >
                                        <span
                                            class="w-3.5 h-3.5 rounded border border-slate-200 shrink-0"
                                            style=format!("background-color: {color}")
                                        ></span>
                                        {nombre}
                                    </button>
                                }
                            }).collect_view()}
                        </div>
                    </div>
                    <div>
                        <div class="text-xs text-slate-400 mb-2">"Nota del diente"</div>
                        <textarea
                            class="w-full px-3 py-2 rounded-lg border border-slate-200 text-sm focus:outline-none focus:border-[#5fb3b0]"
                            rows=3
                            prop:value=move || nota.get()
                            on:input=move |e| set_nota.set(event_target_value(&e))
                            on:blur=guardar_nota
                        ></textarea>
                    </div>
                    {move || error.get().map(|e| view! {
                        <div class="p-2 bg-red-50 border border-red-200 rounded text-red-600 text-xs">{e}</div>
                    })}
                </div>
                <div class="px-5 py-4 border-t border-slate-100 flex justify-end">
                    <button
                        class="px-4 py-2 rounded-lg bg-[#5fb3b0] hover:bg-[#4a9a97] text-white text-sm font-medium"
                        on:click=move |_| on_cerrar.call(())
                    >
                        "Listo"
                    </button>
                </div>
            </div>
        </div>
    }
}
